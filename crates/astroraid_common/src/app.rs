use crate::assets::{FontKind, SoundCue, Sprite};
use crate::color::Color;
use crate::geom::Rect;
use crate::key::Key;

/// Per-frame capabilities the host loop hands to the game: draw calls,
/// viewport measurement and sound playback. The SDL2 frontend implements
/// this over a window canvas; tests implement it with a recording stub.
pub trait Frame {
    /// Viewport size in pixels, (width, height).
    fn viewport(&self) -> (i32, i32);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    fn copy_sprite(&mut self, sprite: Sprite, dest: Rect);

    /// Rendered size of `text` in the given font, (width, height).
    fn text_size(&self, font: FontKind, text: &str) -> (i32, i32);

    fn draw_text(&mut self, font: FontKind, text: &str, color: Color, x: i32, y: i32);

    fn play(&mut self, cue: SoundCue);
}

/// The contract between the game and the host loop. The host polls input,
/// forwards mapped key presses via `handle_key`, then calls `update` once
/// per frame with the current `Frame` before presenting.
pub trait App {
    fn init(&mut self);

    fn update(&mut self, frame: &mut dyn Frame);

    fn handle_key(&mut self, key: Key);
}
