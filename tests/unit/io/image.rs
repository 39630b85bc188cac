//! Tests for texture loading and artifact export

#[cfg(test)]
mod tests {
    use image::{Luma, LumaA, Rgb, RgbImage, Rgba, RgbaImage};
    use wangtiles::WangError;
    use wangtiles::io::image::{load_square_texture, save_image};

    // Tests textures with alpha are converted to RGB on load
    // Verified by returning the image without conversion
    #[test]
    fn test_load_converts_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        RgbaImage::from_pixel(8, 8, Rgba([10, 20, 30, 40]))
            .save(&path)
            .unwrap();

        let texture = load_square_texture(&path).unwrap();

        assert_eq!(texture.dimensions(), (8, 8));
        assert_eq!(texture.get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    // Tests greyscale textures load as RGB
    // Verified by rejecting non-RGB colour types
    #[test]
    fn test_load_grey_texture() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grey.png");
        image::ImageBuffer::from_pixel(4, 4, LumaA([90u8, 255]))
            .save(&path)
            .unwrap();

        let texture = load_square_texture(&path).unwrap();

        assert_eq!(texture.get_pixel(3, 3), &Rgb([90, 90, 90]));
    }

    // Tests non-square textures are rejected with their dimensions
    // Verified by removing the squareness check
    #[test]
    fn test_load_rejects_non_square() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        RgbImage::new(64, 65).save(&path).unwrap();

        assert!(matches!(
            load_square_texture(&path),
            Err(WangError::Shape {
                width: 64,
                height: 65
            })
        ));
    }

    // Tests missing files report an image load error
    // Verified by mapping to a file system error
    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            load_square_texture(&dir.path().join("absent.png")),
            Err(WangError::ImageLoad { .. })
        ));
    }

    // Tests saving creates missing parent directories
    // Verified by removing create_dir_all
    #[test]
    fn test_save_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mask.png");

        save_image(&image::GrayImage::from_pixel(4, 4, Luma([200])), &path).unwrap();

        let saved = image::open(&path).unwrap().to_luma8();
        assert_eq!(saved.get_pixel(1, 2), &Luma([200]));
    }

    // Tests unknown extensions fail as export errors
    // Verified by falling back to png for unknown extensions
    #[test]
    fn test_save_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiles.unknown");

        assert!(matches!(
            save_image(&RgbImage::new(4, 4), &path),
            Err(WangError::ImageExport { .. })
        ));
    }
}
