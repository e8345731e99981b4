use crate::error::PlatformError;

/// Off-screen 32-bit pixel buffer, row-major, addressed `y * width + x`.
///
/// Pixels are `0x00RRGGBB`, the layout a top-down 32-bit DIB expects.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    data: Vec<u32>,
    width: i32,
    height: i32,
}

impl PixelBuffer {
    pub fn with_dimensions(width: i32, height: i32) -> Result<Self, PlatformError> {
        if width <= 0 || height <= 0 {
            return Err(PlatformError::InvalidDimensions { width, height });
        }

        Ok(Self {
            data: vec![0; width as usize * height as usize],
            width,
            height,
        })
    }

    pub fn width(&self) -> i32 { self.width }
    pub fn height(&self) -> i32 { self.height }

    #[inline]
    pub fn index_of(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= self.width || y < 0 || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        self.index_of(x, y).map(|i| self.data[i])
    }

    pub fn fill(&mut self, color: u32) {
        for p in self.data.iter_mut() {
            *p = color;
        }
    }

    pub fn as_slice(&self) -> &[u32] { &self.data }
    pub fn as_mut_slice(&mut self) -> &mut [u32] { &mut self.data }

    pub fn as_ptr(&self) -> *const u32 { self.data.as_ptr() }
}
