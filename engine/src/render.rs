pub mod canvas;
pub mod color;
pub mod font;
pub mod sprite;

pub use canvas::{Canvas, DEFAULT_TEXT_SCALE};
pub use color::Color;
pub use sprite::Sprite;
