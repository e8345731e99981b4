use std::io;
use thiserror::Error;
use platform::PlatformError;

#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("sprite i/o failed: {0}")]
    Io(#[from] io::Error),

    #[error("sprite dimension {0} is negative")]
    NegativeDimension(i32),

    #[error("sprite dimension {0} exceeds the supported maximum")]
    TooLarge(i32),

    #[error("sprite data truncated: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("sprite file format stores square sprites only, got {width}x{height}")]
    NotSquare { width: i32, height: i32 },

    #[error("png decoding failed: {0}")]
    Png(#[from] lodepng::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config has invalid window dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Hook(#[from] anyhow::Error),
}
