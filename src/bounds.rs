/// Partial LED range of the strip
///
/// Carried in the light state and reported by the LED settings query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderingBounds {
    pub start: u8,
    pub end: u8,
}

impl RenderingBounds {
    /// Bounds covering the whole strip of `count` LEDs
    pub const fn full(count: u8) -> Self {
        Self {
            start: 0,
            end: count,
        }
    }
}

/// Get the center of the array
pub const fn center_of<T>(arr: &[T]) -> usize {
    let count = arr.len();
    let mut center_len = count / 2;
    if !count.is_multiple_of(2) {
        center_len += 1;
    }

    if center_len <= count {
        return center_len;
    }
    count
}
