use crate::{
    error::PlatformError,
    graphics::PixelBuffer,
    input::{Input, MouseKey},
};

/// Something the engine can present its off-screen buffer to.
pub trait Surface {
    /// Client area size in pixels.
    fn dimensions(&self) -> (i32, i32);

    fn show(&mut self);

    /// Drains pending messages and refreshes `input`.
    ///
    /// Returns `Ok(false)` once the surface has been closed.
    fn pump(&mut self, input: &mut Input) -> Result<bool, PlatformError>;

    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), PlatformError>;
}

/// Surface without a window. Keeps the last presented frame and closes itself
/// after a fixed number of frames, if one is set.
#[derive(Debug)]
pub struct HeadlessSurface {
    width: i32,
    height: i32,
    frame_limit: Option<usize>,
    frames_presented: usize,
    shown: bool,
    last_frame: Option<Vec<u32>>,
    clicks: Vec<(usize, MouseKey)>,
}

impl HeadlessSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            frame_limit: None,
            frames_presented: 0,
            shown: false,
            last_frame: None,
            clicks: Vec::new(),
        }
    }

    pub fn with_frame_limit(mut self, frames: usize) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    /// Holds `key` down during the pump that precedes frame `frame`.
    pub fn with_click(mut self, frame: usize, key: MouseKey) -> Self {
        self.clicks.push((frame, key));
        self
    }

    pub fn frames_presented(&self) -> usize { self.frames_presented }
    pub fn is_shown(&self) -> bool { self.shown }
    pub fn last_frame(&self) -> Option<&[u32]> { self.last_frame.as_deref() }
}

impl Surface for HeadlessSurface {
    fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn show(&mut self) {
        self.shown = true;
    }

    fn pump(&mut self, input: &mut Input) -> Result<bool, PlatformError> {
        if let Some(limit) = self.frame_limit {
            if self.frames_presented >= limit {
                return Ok(false);
            }
        }

        let frame = self.frames_presented;
        for key in MouseKey::ALL {
            let is_down = self.clicks.iter().any(|&(f, k)| f == frame && k == key);
            input.mouse[key].update(is_down);
        }
        Ok(true)
    }

    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), PlatformError> {
        self.frames_presented += 1;
        self.last_frame = Some(buffer.as_slice().to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_after_frame_limit() {
        let mut surface = HeadlessSurface::new(4, 4).with_frame_limit(2);
        let buffer = PixelBuffer::with_dimensions(4, 4).unwrap();
        let mut input = Input::default();

        assert!(surface.pump(&mut input).unwrap());
        surface.present(&buffer).unwrap();
        assert!(surface.pump(&mut input).unwrap());
        surface.present(&buffer).unwrap();
        assert!(!surface.pump(&mut input).unwrap());
        assert_eq!(surface.frames_presented(), 2);
        assert_eq!(surface.last_frame().map(<[u32]>::len), Some(16));
    }

    #[test]
    fn scripted_click_is_pressed_for_one_frame() {
        let mut surface = HeadlessSurface::new(1, 1).with_click(1, MouseKey::LB);
        let buffer = PixelBuffer::with_dimensions(1, 1).unwrap();
        let mut input = Input::default();

        surface.pump(&mut input).unwrap();
        assert!(input.mouse[MouseKey::LB].is_up());
        surface.present(&buffer).unwrap();

        surface.pump(&mut input).unwrap();
        assert!(input.mouse[MouseKey::LB].pressed());
        surface.present(&buffer).unwrap();

        surface.pump(&mut input).unwrap();
        assert!(input.mouse[MouseKey::LB].released());
    }
}
