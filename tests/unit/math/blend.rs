//! Tests for linear alpha blending

#[cfg(test)]
mod tests {
    use wangtiles::math::blend::{blend_channel, blend_rgb};

    // Tests full coverage keeps the overlay and none keeps the underlay
    // Verified by dropping the rounding term
    #[test]
    fn test_blend_end_points_exact() {
        for under in [0u8, 1, 127, 200, 255] {
            for over in [0u8, 3, 128, 254, 255] {
                assert_eq!(blend_channel(under, over, 0), under);
                assert_eq!(blend_channel(under, over, 255), over);
            }
        }
    }

    // Tests partial coverage mixes linearly with rounding
    // Verified by truncating instead of rounding
    #[test]
    fn test_blend_midpoint() {
        assert_eq!(blend_channel(0, 255, 128), 128);
        assert_eq!(blend_channel(255, 0, 128), 127);
        assert_eq!(blend_channel(100, 200, 51), 120);
    }

    // Tests channels are blended independently
    // Verified by blending all channels with the red value
    #[test]
    fn test_blend_rgb_per_channel() {
        assert_eq!(blend_rgb([0, 100, 255], [255, 100, 0], 255), [255, 100, 0]);
        assert_eq!(blend_rgb([10, 20, 30], [40, 50, 60], 0), [10, 20, 30]);
    }
}
