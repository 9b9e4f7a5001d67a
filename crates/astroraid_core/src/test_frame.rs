use astroraid_common::{Color, FontKind, Frame, Rect, SoundCue, Sprite};

/// Recording stand-in for the SDL2 frame. Text is measured at a fixed 10
/// pixels per character so layout assertions stay simple.
pub struct TestFrame {
    pub viewport: (i32, i32),
    pub rects: Vec<(Rect, Color)>,
    pub sprites: Vec<(Sprite, Rect)>,
    pub texts: Vec<(FontKind, String, i32, i32)>,
    pub cues: Vec<SoundCue>,
}

impl TestFrame {
    pub fn new(viewport: (i32, i32)) -> TestFrame {
        TestFrame {
            viewport,
            rects: Vec::new(),
            sprites: Vec::new(),
            texts: Vec::new(),
            cues: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        self.rects.clear();
        self.sprites.clear();
        self.texts.clear();
        self.cues.clear();
    }

    pub fn text_drawn(&self, needle: &str) -> bool {
        self.texts.iter().any(|(_, text, _, _)| text == needle)
    }
}

impl Frame for TestFrame {
    fn viewport(&self) -> (i32, i32) {
        self.viewport
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.rects.push((rect, color));
    }

    fn copy_sprite(&mut self, sprite: Sprite, dest: Rect) {
        self.sprites.push((sprite, dest));
    }

    fn text_size(&self, font: FontKind, text: &str) -> (i32, i32) {
        (text.len() as i32 * 10, i32::from(font.point_size()))
    }

    fn draw_text(&mut self, font: FontKind, text: &str, _color: Color, x: i32, y: i32) {
        self.texts.push((font, text.to_string(), x, y));
    }

    fn play(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }
}
