use utils::clamp;

/// `0x00RRGGBB` color, the pixel layout of the off-screen buffer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Color {
    data: u32,
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.data
    }
}

impl From<u32> for Color {
    fn from(data: u32) -> Self {
        Self { data: data & !Self::A_MASK }
    }
}

impl From<rgb::RGBA8> for Color {
    fn from(px: rgb::RGBA8) -> Self {
        Self::from_rgb8(px.r, px.g, px.b)
    }
}

impl Color {
    pub fn rgb(mut r: f32, mut g: f32, mut b: f32) -> Self {
        clamp(&mut r, 0.0, 1.0);
        clamp(&mut g, 0.0, 1.0);
        clamp(&mut b, 0.0, 1.0);
        Self::from_rgb8(
            (r * 255.0).round() as u8,
            (g * 255.0).round() as u8,
            (b * 255.0).round() as u8,
        )
    }

    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { data: (r as u32) << 16 | (g as u32) << 8 | b as u32 }
    }

    pub fn r(self) -> u8 { ((self.data & Self::R_MASK) >> 16) as u8 }
    pub fn g(self) -> u8 { ((self.data & Self::G_MASK) >> 8) as u8 }
    pub fn b(self) -> u8 { (self.data & Self::B_MASK) as u8 }

    pub const A_MASK: u32 = 0xFF00_0000;
    pub const R_MASK: u32 = 0x00FF_0000;
    pub const G_MASK: u32 = 0x0000_FF00;
    pub const B_MASK: u32 = 0x0000_00FF;

    pub const BLACK: Self = Self { data: 0 };
    pub const WHITE: Self = Self { data: Self::R_MASK | Self::G_MASK | Self::B_MASK };
    pub const RED: Self = Self { data: Self::R_MASK };
    pub const GREEN: Self = Self { data: Self::G_MASK };
    pub const BLUE: Self = Self { data: Self::B_MASK };
    pub const YELLOW: Self = Self { data: Self::R_MASK | Self::G_MASK };
    pub const PURPLE: Self = Self { data: Self::R_MASK | Self::B_MASK };
    pub const GREY: Self = Self { data: 0x7F7F7F };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_clamps_and_packs() {
        assert_eq!(Color::rgb(1.0, 0.0, 0.0), Color::RED);
        assert_eq!(Color::rgb(2.0, 2.0, 2.0), Color::WHITE);
        assert_eq!(u32::from(Color::rgb(-1.0, 0.5, 1.0)), 0x0000_80FF);
    }

    #[test]
    fn channels_and_alpha_stripping() {
        let color = Color::from(0xFF12_3456);
        assert_eq!(u32::from(color), 0x0012_3456);
        assert_eq!((color.r(), color.g(), color.b()), (0x12, 0x34, 0x56));
        assert_eq!(Color::from(rgb::RGBA8::new(1, 2, 3, 0)), Color::from_rgb8(1, 2, 3));
    }
}
