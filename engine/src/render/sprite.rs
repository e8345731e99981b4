use std::{
    fs,
    io::{self, Read, Write},
    mem::size_of,
    path::{Path, PathBuf},
};
use crate::{
    error::SpriteError,
    file::{Load, Save},
    render::Color,
};

pub const DEFAULT_SPRITE_SIZE: i32 = 8;

/// Largest edge a sprite file may declare.
pub const MAX_SPRITE_DIMENSION: i32 = 4096;

const HEADER_SIZE: usize = size_of::<i32>();
const COLOR_SIZE: usize = size_of::<u32>();

/// Fixed-size raster with a parallel per-pixel opacity mask.
///
/// On disk a sprite is stored without any header or version:
///
/// ```text
/// i32 N                 edge length, little endian; sprites on disk are N x N
/// N*N x i32 color       row-major, little endian 0x00RRGGBB
/// N*N x u8  alpha       0 = transparent, anything else = opaque
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    width: i32,
    height: i32,
    colors: Vec<u32>,
    alpha: Vec<bool>,
    file_name: Option<PathBuf>,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

impl Sprite {
    /// Blank 8x8 sprite.
    pub fn new() -> Self {
        Self::with_dimensions(DEFAULT_SPRITE_SIZE, DEFAULT_SPRITE_SIZE)
    }

    /// Blank sprite: every pixel black and transparent. Negative sizes become 0.
    pub fn with_dimensions(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let len = width as usize * height as usize;

        Self {
            width,
            height,
            colors: vec![0; len],
            alpha: vec![false; len],
            file_name: None,
        }
    }

    /// Loads a sprite file without failing.
    ///
    /// An unreadable file gives an empty 0x0 sprite; a truncated one keeps the
    /// pixels that were present and leaves the rest black and transparent.
    /// Either way the problem is logged and the path is remembered.
    pub fn from_file<P: AsRef<Path>>(filepath: P) -> Self {
        let filepath = filepath.as_ref();
        let mut sprite = match fs::read(filepath) {
            Ok(bytes) => match Self::decode_partial(&bytes) {
                Ok((sprite, expected)) => {
                    if bytes.len() < expected {
                        log::warn!(
                            "sprite {} is truncated ({} of {} bytes), missing pixels left blank",
                            filepath.display(), bytes.len(), expected,
                        );
                    }
                    sprite
                }
                Err(err) => {
                    log::warn!("sprite {} is not valid: {}", filepath.display(), err);
                    Self::with_dimensions(0, 0)
                }
            },
            Err(err) => {
                log::warn!("could not read sprite {}: {}", filepath.display(), err);
                Self::with_dimensions(0, 0)
            }
        };
        sprite.file_name = Some(filepath.to_path_buf());
        sprite
    }

    /// Parses a complete sprite file image.
    pub fn decode(bytes: &[u8]) -> Result<Self, SpriteError> {
        let (sprite, expected) = Self::decode_partial(bytes)?;
        if bytes.len() < expected {
            return Err(SpriteError::Truncated { expected, found: bytes.len() });
        }
        Ok(sprite)
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self, SpriteError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::decode(&bytes)
    }

    /// Decodes as much of `bytes` as is present. Returns the sprite and the
    /// byte length a complete file would have.
    fn decode_partial(bytes: &[u8]) -> Result<(Self, usize), SpriteError> {
        if bytes.len() < HEADER_SIZE {
            return Err(SpriteError::Truncated { expected: HEADER_SIZE, found: bytes.len() });
        }
        let edge = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if edge < 0 {
            return Err(SpriteError::NegativeDimension(edge));
        }
        if edge > MAX_SPRITE_DIMENSION {
            return Err(SpriteError::TooLarge(edge));
        }

        let mut sprite = Self::with_dimensions(edge, edge);
        let len = sprite.colors.len();
        let alpha_start = HEADER_SIZE + len * COLOR_SIZE;
        let expected = alpha_start + len;

        let color_bytes = &bytes[HEADER_SIZE..bytes.len().min(alpha_start)];
        for (dst, src) in sprite.colors.iter_mut().zip(color_bytes.chunks_exact(COLOR_SIZE)) {
            *dst = u32::from_le_bytes([src[0], src[1], src[2], src[3]]);
        }
        if bytes.len() > alpha_start {
            for (dst, &src) in sprite.alpha.iter_mut().zip(&bytes[alpha_start..]) {
                *dst = src != 0;
            }
        }

        Ok((sprite, expected))
    }

    /// Writes the sprite in the sprite file format. Only square sprites fit it.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), SpriteError> {
        if self.width != self.height {
            return Err(SpriteError::NotSquare { width: self.width, height: self.height });
        }

        let mut bytes = Vec::with_capacity(HEADER_SIZE + self.colors.len() * (COLOR_SIZE + 1));
        bytes.extend_from_slice(&self.width.to_le_bytes());
        for color in &self.colors {
            bytes.extend_from_slice(&color.to_le_bytes());
        }
        bytes.extend(self.alpha.iter().map(|&a| a as u8));

        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Imports a PNG. Pixels with alpha of at least one half become opaque.
    pub fn decode_png(bytes: &[u8]) -> Result<Self, SpriteError> {
        let image = lodepng::decode32(bytes)?;
        Self::from_rgba(image.width, image.height, &image.buffer)
    }

    pub fn load_png<P: AsRef<Path>>(filepath: P) -> Result<Self, SpriteError> {
        let filepath = filepath.as_ref();
        let image = lodepng::decode32_file(filepath)?;
        let mut sprite = Self::from_rgba(image.width, image.height, &image.buffer)?;
        sprite.file_name = Some(filepath.to_path_buf());
        Ok(sprite)
    }

    fn from_rgba(width: usize, height: usize, pixels: &[rgb::RGBA8]) -> Result<Self, SpriteError> {
        for edge in [width, height] {
            if edge > MAX_SPRITE_DIMENSION as usize {
                return Err(SpriteError::TooLarge(i32::try_from(edge).unwrap_or(i32::MAX)));
            }
        }

        let mut sprite = Self::with_dimensions(width as i32, height as i32);
        for ((color, alpha), px) in sprite.colors.iter_mut().zip(sprite.alpha.iter_mut()).zip(pixels) {
            *color = Color::from(*px).into();
            *alpha = px.a >= 128;
        }
        Ok(sprite)
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    #[inline]
    fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Maps normalized `(x, y)` onto a pixel. `y` is scaled by `height - 1`
    /// while `x` is scaled by `width`. Non-finite coordinates map nowhere.
    #[inline]
    fn sample_index(&self, x: f32, y: f32) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let sample_x = (x * self.width as f32) as i32;
        let sample_y = (y * (self.height as f32 - 1.0)) as i32;
        self.index_of(sample_x, sample_y)
    }

    /// Color at `(x, y)`, `0` outside the sprite.
    pub fn pixel_color(&self, x: i32, y: i32) -> u32 {
        self.index_of(x, y).map_or(0, |i| self.colors[i])
    }

    /// Opacity at `(x, y)`, `false` outside the sprite.
    pub fn pixel_alpha(&self, x: i32, y: i32) -> bool {
        self.index_of(x, y).map_or(false, |i| self.alpha[i])
    }

    pub fn sample_color(&self, x: f32, y: f32) -> u32 {
        self.sample_index(x, y).map_or(0, |i| self.colors[i])
    }

    pub fn sample_alpha(&self, x: f32, y: f32) -> bool {
        self.sample_index(x, y).map_or(false, |i| self.alpha[i])
    }

    /// Sets the color at `(x, y)` and marks the pixel opaque. No-op outside the sprite.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if let Some(i) = self.index_of(x, y) {
            self.colors[i] = color;
            self.alpha[i] = true;
        }
    }
}

impl Load for Sprite {
    type Error = SpriteError;

    fn load<P: AsRef<Path>>(filepath: P) -> Result<Self, SpriteError> {
        let filepath = filepath.as_ref();
        let mut sprite = Self::decode(&fs::read(filepath)?)?;
        sprite.file_name = Some(filepath.to_path_buf());
        Ok(sprite)
    }
}

impl Save for Sprite {
    type Error = SpriteError;

    fn save<P: AsRef<Path>>(&self, filepath: P) -> Result<(), SpriteError> {
        let file = fs::File::create(filepath)?;
        self.write_to(io::BufWriter::new(file))
    }
}
