use astroraid_common::{Color, FontKind, Frame};

pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const RESTART_PROMPT: &str = "PRESS ENTER TO RESTART";

/// The end screen: final score and the restart prompt. Read-only view over
/// the score it was created with.
pub struct EndScreen {
    score: u32,
}

impl EndScreen {
    pub fn new(score: u32) -> EndScreen {
        EndScreen { score }
    }

    pub fn draw(&self, frame: &mut dyn Frame) {
        let (viewport_width, viewport_height) = frame.viewport();

        let center = |frame: &dyn Frame, font: FontKind, text: &str| {
            let (width, _) = frame.text_size(font, text);
            viewport_width / 2 - width / 2
        };

        let x = center(frame, FontKind::Title, GAME_OVER_TEXT);
        frame.draw_text(
            FontKind::Title,
            GAME_OVER_TEXT,
            Color::PINK,
            x,
            viewport_height / 2 - 100,
        );

        let score_text = format!("POINTS: {}", self.score);
        let x = center(frame, FontKind::Title, &score_text);
        frame.draw_text(
            FontKind::Title,
            &score_text,
            Color::PINK,
            x,
            viewport_height / 2,
        );

        let x = center(frame, FontKind::Info, RESTART_PROMPT);
        frame.draw_text(
            FontKind::Info,
            RESTART_PROMPT,
            Color::PINK,
            x,
            viewport_height / 2 + 100,
        );
    }
}
