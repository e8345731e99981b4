
/// Pins `val` into `[min, max]`.
#[inline]
pub fn clamp<T>(val: &mut T, min: T, max: T)
    where T: PartialOrd
{
    if *val < min {
        *val = min
    } else if *val > max {
        *val = max
    }
}

/// [`clamp`] applied to both coordinates of a point.
#[inline]
pub fn point_clamp<T>(point: &mut (T, T), min: (T, T), max: (T, T))
    where T: PartialOrd
{
    clamp(&mut point.0, min.0, max.0);
    clamp(&mut point.1, min.1, max.1);
}

/// Nearest-neighbour source index for position `i` of a span stretched from
/// `src_len` to `dst_len` elements. `dst_len` must be positive.
#[inline]
pub fn nearest_index(i: i32, dst_len: i32, src_len: i32) -> i32 {
    (i as i64 * src_len as i64 / dst_len as i64) as i32
}
