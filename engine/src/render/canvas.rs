use std::{mem, ops::Range};
use platform::{PixelBuffer, PlatformError};
use utils::{nearest_index, point_clamp};
use super::{
    font::{self, GLYPH_SIZE},
    Sprite,
};

pub const DEFAULT_TEXT_SCALE: u32 = 3;

/// Immediate-mode drawing into the off-screen buffer.
///
/// Every primitive goes through [`Canvas::set_point`], so writes outside
/// `[0, width) x [0, height)` are dropped rather than clipped up front.
#[derive(Clone, Debug)]
pub struct Canvas {
    buffer: PixelBuffer,
}

impl Canvas {
    pub fn new(width: i32, height: i32) -> Result<Self, PlatformError> {
        Ok(Self::from_buffer(PixelBuffer::with_dimensions(width, height)?))
    }

    pub fn from_buffer(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }

    pub fn width(&self) -> i32 { self.buffer.width() }
    pub fn height(&self) -> i32 { self.buffer.height() }
    pub fn buffer(&self) -> &PixelBuffer { &self.buffer }

    /// Pixel at `(x, y)`, `0` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> u32 {
        self.buffer.get(x, y).unwrap_or(0)
    }

    pub fn clear(&mut self, color: impl Into<u32>) {
        self.buffer.fill(color.into());
    }

    #[inline]
    pub fn set_point(&mut self, x: i32, y: i32, color: impl Into<u32>) {
        if let Some(i) = self.buffer.index_of(x, y) {
            self.buffer.as_mut_slice()[i] = color.into();
        }
    }

    /// Bresenham line from `(start_x, start_y)` to `(end_x, end_y)`, both ends included.
    ///
    /// Only the part of the working axis inside the canvas is walked; the
    /// error term is advanced to that point in one step.
    pub fn set_line(&mut self, start_x: i32, start_y: i32, end_x: i32, end_y: i32, color: impl Into<u32>) {
        let color = color.into();
        let (mut x0, mut y0) = (i64::from(start_x), i64::from(start_y));
        let (mut x1, mut y1) = (i64::from(end_x), i64::from(end_y));

        // walk along the longer axis
        let axis_swapped = (x1 - x0).abs() < (y1 - y0).abs();
        if axis_swapped {
            mem::swap(&mut x0, &mut y0);
            mem::swap(&mut x1, &mut y1);
        }

        let delta_x = (x1 - x0).abs();
        let delta_y = (y1 - y0).abs();

        if x0 > x1 {
            mem::swap(&mut x0, &mut x1);
            mem::swap(&mut y0, &mut y1);
        }

        let delta_err = delta_y + 1;
        let threshold = delta_x + 1;
        let dir_y = (y1 - y0).signum();

        let extent = i64::from(if axis_swapped { self.height() } else { self.width() });
        let first = x0.max(0);
        let last = x1.min(extent - 1);
        if first > last {
            return;
        }

        // delta_err <= threshold, so y moves at most once per step
        let skipped = i128::from(first - x0) * i128::from(delta_err);
        let mut y = y0 + dir_y * (skipped / i128::from(threshold)) as i64;
        let mut error = (skipped % i128::from(threshold)) as i64;
        for x in first..=last {
            let (px, py) = if axis_swapped { (y, x) } else { (x, y) };
            if let (Ok(px), Ok(py)) = (i32::try_from(px), i32::try_from(py)) {
                self.set_point(px, py, color);
            }

            error += delta_err;
            if error >= threshold {
                y += dir_y;
                error -= threshold;
            }
        }
    }

    /// Fills the half-open rectangle `[p0, p1)`, clamped to the canvas.
    pub fn fill_rect(&mut self, mut p0: (i32, i32), mut p1: (i32, i32), color: impl Into<u32>) {
        let color = color.into();
        let max = (self.width(), self.height());
        point_clamp(&mut p0, (0, 0), max);
        point_clamp(&mut p1, (0, 0), max);

        for y in p0.1..p1.1 {
            for x in p0.0..p1.0 {
                self.set_point(x, y, color);
            }
        }
    }

    /// Draws `text` with the built-in 8x8 font, each font pixel blown up to a
    /// `scale` x `scale` block. `'\n'` starts a new line below `(x, y)`.
    /// Characters outside the font advance the cursor without drawing.
    pub fn draw_text_line(&mut self, x: i32, y: i32, text: &str, color: impl Into<u32>, scale: u32) {
        let color = color.into();
        let sheet = font::font_sheet();
        let scale = i64::from(scale.max(1));
        let advance = i64::from(GLYPH_SIZE) * scale;

        let (mut sx, mut sy) = (i64::from(x), i64::from(y));
        for c in text.bytes() {
            if c == b'\n' {
                sx = i64::from(x);
                sy += advance;
                continue;
            }

            let (ox, oy) = font::glyph_origin(c);
            for i in 0..GLYPH_SIZE {
                for j in 0..GLYPH_SIZE {
                    if sheet.pixel_color(ox + i, oy + j) != 0 {
                        let left = sx + i64::from(i) * scale;
                        let top = sy + i64::from(j) * scale;
                        self.fill_block((left, top), (left + scale, top + scale), color);
                    }
                }
            }
            sx += advance;
        }
    }

    /// Stretches `sprite` over the `width` x `height` rectangle at `(x, y)`
    /// with nearest-neighbour sampling, skipping transparent pixels.
    pub fn draw_sprite(&mut self, x: i32, y: i32, width: i32, height: i32, sprite: &Sprite) {
        if width <= 0 || height <= 0 {
            return;
        }

        let cols = Self::visible_span(x, width, self.width());
        for j in Self::visible_span(y, height, self.height()) {
            let src_y = nearest_index(j, height, sprite.height());
            for i in cols.clone() {
                let src_x = nearest_index(i, width, sprite.width());
                if sprite.pixel_alpha(src_x, src_y) {
                    self.set_point(x + i, y + j, sprite.pixel_color(src_x, src_y));
                }
            }
        }
    }

    /// Offsets in `0..len` whose `origin + offset` falls inside `0..extent`.
    fn visible_span(origin: i32, len: i32, extent: i32) -> Range<i32> {
        let origin = i64::from(origin);
        let start = (-origin).clamp(0, i64::from(len));
        let end = (i64::from(extent) - origin).clamp(start, i64::from(len));
        start as i32..end as i32
    }

    /// Fills `[p0, p1)` given in unbounded coordinates, clipped to the canvas.
    fn fill_block(&mut self, p0: (i64, i64), p1: (i64, i64), color: u32) {
        let clip = |v: i64, extent: i32| v.clamp(0, i64::from(extent)) as i32;
        let (x0, x1) = (clip(p0.0, self.width()), clip(p1.0, self.width()));
        let (y0, y1) = (clip(p0.1, self.height()), clip(p1.1, self.height()));
        for y in y0..y1 {
            for x in x0..x1 {
                self.set_point(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;

    const C: u32 = 0x00AB_CDEF;

    fn lit(canvas: &Canvas) -> Vec<(i32, i32)> {
        let mut points = Vec::new();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.pixel(x, y) != 0 {
                    points.push((x, y));
                }
            }
        }
        points
    }

    #[test]
    fn set_point_then_read_back() {
        let mut canvas = Canvas::new(16, 9).unwrap();
        for y in 0..9 {
            for x in 0..16 {
                let color = (y * 16 + x + 1) as u32;
                canvas.set_point(x, y, color);
                assert_eq!(canvas.pixel(x, y), color);
            }
        }
    }

    #[test]
    fn out_of_bounds_points_are_dropped() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        for &(x, y) in &[(-1, 0), (0, -1), (4, 0), (0, 4), (i32::MIN, i32::MAX)] {
            canvas.set_point(x, y, C);
            assert_eq!(canvas.pixel(x, y), 0);
        }
        assert!(lit(&canvas).is_empty());
    }

    #[test]
    fn horizontal_line() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.set_line(0, 0, 4, 0, C);
        assert_eq!(lit(&canvas), [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert!((0..5).all(|x| canvas.pixel(x, 0) == C));
    }

    #[test]
    fn vertical_line_uses_swapped_axis() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.set_line(0, 0, 0, 4, C);
        assert_eq!(lit(&canvas), [(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
    }

    #[test]
    fn reversed_endpoints_draw_the_same_line() {
        let mut forward = Canvas::new(12, 12).unwrap();
        let mut backward = Canvas::new(12, 12).unwrap();
        forward.set_line(1, 2, 10, 7, C);
        backward.set_line(10, 7, 1, 2, C);
        assert_eq!(lit(&forward), lit(&backward));
    }

    #[test]
    fn diagonal_and_shallow_lines() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.set_line(0, 0, 3, 3, C);
        assert_eq!(lit(&canvas), [(0, 0), (1, 1), (2, 2), (3, 3)]);

        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.set_line(0, 0, 3, 1, C);
        let points = lit(&canvas);
        assert_eq!(points.len(), 4);
        assert!(points.contains(&(0, 0)) && points.contains(&(3, 1)));

        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.set_line(0, 4, 4, 0, C);
        assert_eq!(lit(&canvas), [(4, 0), (3, 1), (2, 2), (1, 3), (0, 4)]);
    }

    #[test]
    fn steep_line_has_one_point_per_row() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.set_line(1, 0, 3, 7, C);
        let points = lit(&canvas);
        assert_eq!(points.len(), 8);
        for y in 0..8 {
            assert_eq!(points.iter().filter(|p| p.1 == y).count(), 1);
        }
        assert!(points.contains(&(1, 0)) && points.contains(&(3, 7)));
    }

    #[test]
    fn lines_leaving_the_canvas_keep_their_visible_part() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.set_line(-3, 1, 6, 1, C);
        assert_eq!(lit(&canvas), [(0, 1), (1, 1), (2, 1), (3, 1)]);
    }

    #[test]
    fn single_point_line() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.set_line(2, 2, 2, 2, C);
        assert_eq!(lit(&canvas), [(2, 2)]);
    }

    #[test]
    fn text_draws_glyph_pixels_only() {
        let mut canvas = Canvas::new(32, 32).unwrap();
        canvas.draw_text_line(10, 20, "-", C, 1);
        assert_eq!(lit(&canvas), (10..16).map(|x| (x, 23)).collect::<Vec<_>>());
    }

    #[test]
    fn text_scale_replicates_pixels() {
        let mut canvas = Canvas::new(32, 32).unwrap();
        canvas.draw_text_line(0, 0, "-", C, 2);
        let points = lit(&canvas);
        assert_eq!(points.len(), 6 * 4);
        assert!(points.iter().all(|&(x, y)| x < 12 && (y == 6 || y == 7)));

        let mut canvas = Canvas::new(32, 32).unwrap();
        canvas.draw_text_line(0, 0, "!", C, 1);
        assert_eq!(lit(&canvas).len(), 20);

        let mut canvas = Canvas::new(64, 64).unwrap();
        canvas.draw_text_line(0, 0, "!", C, DEFAULT_TEXT_SCALE);
        assert_eq!(lit(&canvas).len(), 20 * 9);
    }

    #[test]
    fn text_advances_and_breaks_lines() {
        let mut canvas = Canvas::new(64, 64).unwrap();
        canvas.draw_text_line(0, 0, "--\n\t-", C, 1);
        assert_eq!(canvas.pixel(0, 3), C);
        assert_eq!(canvas.pixel(8, 3), C);
        // tab has no glyph but still takes a cell
        assert_eq!(canvas.pixel(0, 11), 0);
        assert_eq!(canvas.pixel(8, 11), C);
        assert_eq!(lit(&canvas).len(), 18);
    }

    #[test]
    fn text_is_clipped_per_pixel() {
        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.draw_text_line(-2, 0, "-", C, 1);
        assert_eq!(lit(&canvas), [(0, 3), (1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn fill_rect_and_clear() {
        let mut canvas = Canvas::new(6, 6).unwrap();
        canvas.fill_rect((-2, 4), (3, 10), Color::RED);
        assert_eq!(lit(&canvas).len(), 3 * 2);
        assert_eq!(canvas.pixel(2, 5), u32::from(Color::RED));

        canvas.clear(Color::BLUE);
        assert!(canvas.buffer().as_slice().iter().all(|&p| p == u32::from(Color::BLUE)));
    }

    #[test]
    fn draw_sprite_respects_alpha_and_scales() {
        let mut sprite = Sprite::with_dimensions(2, 2);
        sprite.set_pixel(0, 0, C);
        sprite.set_pixel(1, 1, 0x0000_00FF);

        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.draw_sprite(1, 1, 2, 2, &sprite);
        assert_eq!(canvas.pixel(1, 1), C);
        assert_eq!(canvas.pixel(2, 1), 0);
        assert_eq!(canvas.pixel(1, 2), 0);
        assert_eq!(canvas.pixel(2, 2), 0x0000_00FF);
        assert_eq!(canvas.pixel(0, 0), 0);

        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.draw_sprite(0, 0, 4, 4, &sprite);
        assert_eq!(canvas.pixel(0, 0), C);
        assert_eq!(canvas.pixel(1, 1), C);
        assert_eq!(canvas.pixel(3, 3), 0x0000_00FF);
        assert_eq!(canvas.pixel(3, 0), 0);
    }

    #[test]
    fn lines_with_far_apart_endpoints() {
        let mut canvas = Canvas::new(8, 4).unwrap();
        canvas.set_line(-2_000_000_000, 0, 2_000_000_000, 0, C);
        assert_eq!(lit(&canvas), (0..8).map(|x| (x, 0)).collect::<Vec<_>>());

        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.set_line(i32::MIN, i32::MIN, i32::MAX, i32::MAX, C);
        assert_eq!(lit(&canvas), [(0, 0), (1, 1), (2, 2), (3, 3)]);

        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.set_line(1, i32::MAX, 1, i32::MIN, C);
        assert_eq!(lit(&canvas), [(1, 0), (1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn text_near_the_integer_limits() {
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.draw_text_line(i32::MAX - 4, 0, "A", C, 1);
        canvas.draw_text_line(0, i32::MAX, "A\nA", C, 1);
        canvas.draw_text_line(i32::MIN, i32::MIN, "AA", C, DEFAULT_TEXT_SCALE);
        assert!(lit(&canvas).is_empty());

        // only the first glyph pixel's block can reach the canvas
        let mut canvas = Canvas::new(8, 8).unwrap();
        canvas.draw_text_line(0, 0, "A", C, u32::MAX);
        let (ox, oy) = font::glyph_origin(b'A');
        let expected = if font::font_sheet().pixel_color(ox, oy) != 0 { C } else { 0 };
        assert!(canvas.buffer().as_slice().iter().all(|&p| p == expected));
    }

    #[test]
    fn sprite_near_the_integer_limits() {
        let mut sprite = Sprite::with_dimensions(1, 1);
        sprite.set_pixel(0, 0, C);

        let mut canvas = Canvas::new(4, 4).unwrap();
        canvas.draw_sprite(i32::MAX - 1, 0, 4, 4, &sprite);
        assert!(lit(&canvas).is_empty());

        canvas.draw_sprite(-2, -2, 4, 4, &sprite);
        assert_eq!(lit(&canvas), [(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
