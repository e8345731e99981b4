#[cfg(windows)]
#[macro_use]
pub mod debug;
pub mod error;
pub mod graphics;
pub mod input;
pub mod surface;
pub mod time;
#[cfg(windows)]
pub mod window;

pub use error::PlatformError;
pub use graphics::PixelBuffer;
pub use surface::{HeadlessSurface, Surface};
