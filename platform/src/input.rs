use core::ops::{Index, IndexMut};

/// Keyboard and mouse state as of the last pump.
#[derive(Default, Debug)]
pub struct Input {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl Input {
    /// Releases every tracked key and button, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        for key in KBKey::ALL {
            self.keyboard[key].update(false);
        }
        for key in MouseKey::ALL {
            self.mouse[key].update(false);
        }
    }
}

/// Indexed by virtual-key code.
#[derive(Debug)]
pub struct KeyboardState {
    keys: [DigitalKey; 0x100],
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self { keys: [DigitalKey::default(); 0x100] }
    }
}

impl Index<KBKey> for KeyboardState {
    type Output = DigitalKey;
    fn index(&self, key: KBKey) -> &DigitalKey {
        &self.keys[key as usize]
    }
}

impl IndexMut<KBKey> for KeyboardState {
    fn index_mut(&mut self, key: KBKey) -> &mut DigitalKey {
        &mut self.keys[key as usize]
    }
}

/// Cursor position in client coordinates plus button states.
#[derive(Default, Debug)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    buttons: [DigitalKey; MouseKey::ALL.len()],
}

impl MouseState {
    #[inline(always)] pub fn pos(&self) -> (i32, i32) { (self.x, self.y) }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MouseKey {
    LB = 0,
    RB = 1,
    MB = 2,
}

impl MouseKey {
    pub const ALL: [MouseKey; 3] = [MouseKey::LB, MouseKey::RB, MouseKey::MB];
}

impl Index<MouseKey> for MouseState {
    type Output = DigitalKey;
    fn index(&self, key: MouseKey) -> &DigitalKey {
        &self.buttons[key as usize]
    }
}

impl IndexMut<MouseKey> for MouseState {
    fn index_mut(&mut self, key: MouseKey) -> &mut DigitalKey {
        &mut self.buttons[key as usize]
    }
}

/// Two-sample key state, so edges can be told apart from holds.
#[derive(Copy, Clone, Default, Debug)]
pub struct DigitalKey {
    down: bool,
    was_down: bool,
}

impl DigitalKey {
    #[inline(always)] pub fn is_down(self) -> bool { self.down }
    #[inline(always)] pub fn is_up(self) -> bool { !self.down }

    #[inline(always)] pub fn pressed(self) -> bool { self.down && !self.was_down }
    #[inline(always)] pub fn released(self) -> bool { !self.down && self.was_down }

    #[inline(always)]
    pub fn update(&mut self, down: bool) {
        self.was_down = self.down;
        self.down = down;
    }
}

/// Virtual-key codes polled every frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KBKey {
    Backspace = 0x08,
    Tab = 0x09,
    Enter = 0x0D,
    Shift = 0x10,
    Ctrl = 0x11,
    Alt = 0x12,
    Escape = 0x1B,
    Space = 0x20,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    A = 0x41,
    D = 0x44,
    R = 0x52,
    S = 0x53,
    W = 0x57,
    F5 = 0x74,
    F11 = 0x7A,
}

impl KBKey {
    pub const ALL: [KBKey; 19] = {
        use KBKey::*;
        [
            Backspace, Tab, Enter,
            Shift, Ctrl, Alt,
            Escape, Space,
            Left, Up, Right, Down,
            A, D, R, S, W,
            F5, F11,
        ]
    };
}
