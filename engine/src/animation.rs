use std::{
    cell::Cell,
    collections::VecDeque,
    rc::Rc,
};
use crate::render::Sprite;

/// Ordered queue of frames plus playback flags.
///
/// Animations are shared between objects as `Rc<Animation>`, so the flags a
/// shared owner may flip (`delayed_start`) are cells.
#[derive(Debug, Default)]
pub struct Animation {
    frames: VecDeque<Rc<Sprite>>,
    current: Option<Rc<Sprite>>,
    is_playing: bool,
    is_delayed: Cell<bool>,
    played_all_cycle: bool,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a frame and makes it the current one.
    pub fn assign_frame(&mut self, sprite: Rc<Sprite>) {
        self.current = Some(Rc::clone(&sprite));
        self.frames.push_back(sprite);
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> impl Iterator<Item = &Rc<Sprite>> {
        self.frames.iter()
    }

    /// Last frame passed to [`assign_frame`](Self::assign_frame).
    pub fn current_sprite(&self) -> Option<Rc<Sprite>> {
        self.current.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_delayed(&self) -> bool {
        self.is_delayed.get()
    }

    pub fn played_all_cycle(&self) -> bool {
        self.played_all_cycle
    }

    /// Requests (or cancels) a start on the next `play`.
    pub fn delayed_start(&self, delayed: bool) {
        self.is_delayed.set(delayed);
    }

    /// Returns the frame to show for an object of the given size.
    ///
    /// Frame advancing is not implemented: the current frame is returned and
    /// neither the queue nor any flag changes. `elapsed_time`, `speed` and
    /// `force` are accepted so callers are already written against the full
    /// contract.
    pub fn play(
        &self,
        _obj_width: i32,
        _obj_height: i32,
        _elapsed_time: f32,
        _speed: f32,
        _force: bool,
    ) -> Option<Rc<Sprite>> {
        self.current_sprite()
    }
}
