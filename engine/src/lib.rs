//! Software-rasterizing 2D engine scaffold: an off-screen pixel buffer blitted to a
//! window every frame, a handful of drawing primitives, and the sprite, animation,
//! game object and weapon building blocks a game is assembled from.

pub mod animation;
pub mod audio;
pub mod config;
pub mod engine;
pub mod error;
pub mod file;
pub mod geom;
pub mod object;
pub mod render;
pub mod weapon;

pub use crate::{
    animation::Animation,
    audio::AudioSource,
    config::EngineConfig,
    engine::{Engine, Flow, Game},
    error::{ConfigError, EngineError, SpriteError},
    file::{Load, Save},
    object::{GameObject, ObjectState, Process},
    render::{Canvas, Color, Sprite},
    weapon::{DrawSelf, Weapon, WeaponType},
};
pub use platform;
