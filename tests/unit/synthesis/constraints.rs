//! Tests for the per-tile graph cut constraint layout

#[cfg(test)]
mod tests {
    use image::Rgb;
    use wangtiles::io::configuration::{
        CONSTRAINT_COLOR_FREE, CONSTRAINT_COLOR_SINK, CONSTRAINT_COLOR_SOURCE,
    };
    use wangtiles::synthesis::constraints::{Constraint, ConstraintMap};

    // Tests the tile border is bound to the packed corners
    // Verified by skipping the last column
    #[test]
    fn test_border_is_source() {
        let map = ConstraintMap::new(16);

        for p in 0..16 {
            assert_eq!(map.get(p, 0), Constraint::Source);
            assert_eq!(map.get(p, 15), Constraint::Source);
            assert_eq!(map.get(0, p), Constraint::Source);
            assert_eq!(map.get(15, p), Constraint::Source);
        }
    }

    // Tests the middle cross and inner square are bound to the source texture
    // Verified by setting only one middle row
    #[test]
    fn test_cross_and_inner_square_are_sink() {
        let map = ConstraintMap::new(16);

        assert_eq!(map.get(1, 7), Constraint::Sink);
        assert_eq!(map.get(1, 8), Constraint::Sink);
        assert_eq!(map.get(7, 14), Constraint::Sink);
        assert_eq!(map.get(2, 2), Constraint::Sink);
        assert_eq!(map.get(13, 13), Constraint::Sink);
        assert_eq!(map.get(1, 1), Constraint::Free);
        assert_eq!(map.get(14, 3), Constraint::Free);
    }

    // Tests the number of pixels in each class
    // Verified by changing the padding divisor to 8
    #[test]
    fn test_constraint_counts() {
        let map = ConstraintMap::new(16);

        assert_eq!(map.size(), 16);
        assert_eq!(map.count(Constraint::Source), 60);
        assert_eq!(map.count(Constraint::Free), 44);
        assert_eq!(map.count(Constraint::Sink), 152);
    }

    // Tests tiny tiles without padding become entirely sink
    // Verified by clamping the padding to one pixel
    #[test]
    fn test_tiny_tile_all_sink() {
        let map = ConstraintMap::new(4);

        assert_eq!(map.count(Constraint::Sink), 16);
        assert_eq!(ConstraintMap::new(0).size(), 0);
    }

    // Tests lookups outside the map count as free
    // Verified by panicking on out of range lookups
    #[test]
    fn test_get_outside_is_free() {
        let map = ConstraintMap::new(8);

        assert_eq!(map.get(8, 0), Constraint::Free);
        assert_eq!(map.get(0, 100), Constraint::Free);
    }

    // Tests the diagnostic raster uses the constraint colours
    // Verified by swapping source and sink colours
    #[test]
    fn test_to_image_colors() {
        let map = ConstraintMap::new(16);

        let image = map.to_image();

        assert_eq!(image.dimensions(), (16, 16));
        assert_eq!(image.get_pixel(0, 0), &Rgb(CONSTRAINT_COLOR_SOURCE));
        assert_eq!(image.get_pixel(8, 8), &Rgb(CONSTRAINT_COLOR_SINK));
        assert_eq!(image.get_pixel(1, 1), &Rgb(CONSTRAINT_COLOR_FREE));
        assert_eq!(Constraint::Free.color(), CONSTRAINT_COLOR_FREE);
    }
}
