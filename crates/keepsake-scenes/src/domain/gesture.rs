//! Swipe classification.

/// Minimum horizontal travel, in pixels, for a swipe to count as a cut.
pub const SLICE_SWIPE_MIN_DX: f32 = 30.0;

/// Returns `true` for a mostly-horizontal swipe long enough to slice.
#[must_use]
pub fn is_slice_swipe(dx: f32, dy: f32) -> bool {
    dx.abs() > dy.abs() && dx.abs() > SLICE_SWIPE_MIN_DX
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_swipes_past_threshold_slice_in_either_direction() {
        assert!(is_slice_swipe(31.0, 0.0));
        assert!(is_slice_swipe(-120.0, 40.0));
    }

    #[test]
    fn test_short_or_vertical_swipes_do_not_slice() {
        assert!(!is_slice_swipe(30.0, 0.0));
        assert!(!is_slice_swipe(80.0, 80.0));
        assert!(!is_slice_swipe(10.0, -200.0));
        assert!(!is_slice_swipe(f32::NAN, 0.0));
    }
}
