pub mod app;
pub mod assets;
pub mod color;
pub mod geom;
pub mod key;

pub use app::{App, Frame};
pub use assets::{FontKind, SoundCue, Sprite};
pub use color::Color;
pub use geom::Rect;
pub use key::Key;
