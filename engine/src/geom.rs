use core::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Point or offset in screen (`V2i`) or world (`V2f`) space.
#[derive(Copy, Clone, Default, PartialEq, Debug)]
pub struct V2<T> {
    pub x: T,
    pub y: T,
}

pub type V2i = V2<i32>;
pub type V2f = V2<f32>;

impl<T> V2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Copy + Add<Output = T> + Mul<Output = T>> V2<T> {
    pub fn dot(self, rhs: Self) -> T {
        self.x * rhs.x + self.y * rhs.y
    }
}

impl V2f {
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }
}

impl From<V2i> for V2f {
    fn from(v: V2i) -> Self {
        Self::new(v.x as f32, v.y as f32)
    }
}

/// Truncates toward zero.
impl From<V2f> for V2i {
    fn from(v: V2f) -> Self {
        Self::new(v.x as i32, v.y as i32)
    }
}

impl<T: Add<Output = T>> Add for V2<T> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: AddAssign> AddAssign for V2<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T: Sub<Output = T>> Sub for V2<T> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: SubAssign> SubAssign for V2<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T: Copy + Mul<Output = T>> Mul<T> for V2<T> {
    type Output = Self;
    fn mul(self, rhs: T) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let mut a = V2i::new(1, 2);
        a += V2::new(3, 4);
        assert_eq!(a, V2::new(4, 6));
        a -= V2::new(1, 1);
        assert_eq!(a * 2, V2::new(6, 10));
        assert_eq!(V2f::from(V2i::new(2, -3)), V2::new(2.0, -3.0));
        assert_eq!(V2i::from(V2f::new(1.9, -1.9)), V2::new(1, -1));
    }

    #[test]
    fn distance() {
        assert_eq!(V2f::new(0.0, 0.0).distance(V2f::new(3.0, 4.0)), 5.0);
        assert_eq!(V2f::new(1.0, 0.0).dot(V2f::new(0.0, 1.0)), 0.0);
        assert_eq!(V2i::new(2, 3).dot(V2i::new(4, 5)), 23);
    }
}
