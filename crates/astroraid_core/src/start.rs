use astroraid_common::{Color, FontKind, Frame, Rect, Sprite};

const TITLE_SPRITE_WIDTH: i32 = 400;
const TITLE_SPRITE_HEIGHT: i32 = 428;

pub const TITLE_TEXT: &str = "ASTRO RAID";
pub const START_PROMPT: &str = "PRESS ENTER TO START";

/// The start screen: a two-frame alien animation plus title and prompt.
/// Purely presentational; the only state is the animation counter.
pub struct StartScreen {
    frame_counter: u32,
}

impl StartScreen {
    pub fn new() -> StartScreen {
        StartScreen { frame_counter: 0 }
    }

    pub fn draw(&mut self, frame: &mut dyn Frame) {
        let (viewport_width, viewport_height) = frame.viewport();

        // Swap the sprite every ten frames for a simple wiggle.
        self.frame_counter += 1;
        let sprite = if self.frame_counter < 10 {
            Sprite::Title1
        } else {
            Sprite::Title2
        };
        if self.frame_counter > 20 {
            self.frame_counter = 0;
        }

        frame.copy_sprite(
            sprite,
            Rect::new(
                viewport_width / 2 - TITLE_SPRITE_WIDTH / 2,
                viewport_height / 2 - TITLE_SPRITE_HEIGHT / 2 - 100,
                TITLE_SPRITE_WIDTH,
                TITLE_SPRITE_HEIGHT,
            ),
        );

        let (title_width, _) = frame.text_size(FontKind::Title, TITLE_TEXT);
        frame.draw_text(
            FontKind::Title,
            TITLE_TEXT,
            Color::PINK,
            viewport_width / 2 - title_width / 2,
            viewport_height - 250,
        );

        let (prompt_width, _) = frame.text_size(FontKind::Info, START_PROMPT);
        frame.draw_text(
            FontKind::Info,
            START_PROMPT,
            Color::PINK,
            viewport_width / 2 - prompt_width / 2,
            viewport_height - 120,
        );
    }
}

impl Default for StartScreen {
    fn default() -> Self {
        StartScreen::new()
    }
}
