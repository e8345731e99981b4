use std::{fs, path::Path, time::Duration};
use serde::Deserialize;
use crate::{error::ConfigError, file::Load};

/// Window and loop settings. Every field is optional in the TOML source.
///
/// ```toml
/// title = "tde"
/// width = 800
/// height = 600
/// x = 250
/// y = 250
/// target_fps = 60
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub x: i32,
    pub y: i32,
    /// `0` runs the loop unthrottled.
    pub target_fps: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "tde".to_owned(),
            width: 800,
            height: 600,
            x: 250,
            y: 250,
            target_fps: 60,
        }
    }
}

impl EngineConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        if config.width <= 0 || config.height <= 0 {
            return Err(ConfigError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        Ok(config)
    }

    pub fn frame_time(&self) -> Option<Duration> {
        if self.target_fps == 0 {
            None
        } else {
            Some(Duration::from_secs_f64(1.0 / self.target_fps as f64))
        }
    }
}

impl Load for EngineConfig {
    type Error = ConfigError;

    fn load<P: AsRef<Path>>(filepath: P) -> Result<Self, ConfigError> {
        Self::from_toml(&fs::read_to_string(filepath)?)
    }
}
