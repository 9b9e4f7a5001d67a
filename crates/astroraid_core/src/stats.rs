use astroraid_common::{Color, FontKind, Frame};

/// Margin between the overlay text and the viewport edges.
const PADDING: i32 = 10;

/// In-game HUD: lives top-left, zero-padded score top-right. A read-only
/// view over the game's counters, redrawn from scratch every frame.
pub struct Stats;

impl Stats {
    pub fn new() -> Stats {
        Stats
    }

    pub fn draw(&self, frame: &mut dyn Frame, lives: u32, points: u32) {
        let (viewport_width, _) = frame.viewport();

        let lives_text = format!("LIVES: {lives}");
        frame.draw_text(FontKind::Stats, &lives_text, Color::PINK, PADDING, PADDING);

        let points_text = format!("POINTS: {points:08}");
        let (width, _) = frame.text_size(FontKind::Stats, &points_text);
        frame.draw_text(
            FontKind::Stats,
            &points_text,
            Color::PINK,
            viewport_width - width - PADDING,
            PADDING,
        );
    }
}

impl Default for Stats {
    fn default() -> Self {
        Stats::new()
    }
}
