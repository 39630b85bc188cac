//! Tests for the headerless raw buffer codec

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use wangtiles::WangError;
    use wangtiles::io::buffer::{
        ChannelLayout, RawBuffer, decode, decode_inferred_rgb, encode, infer_side,
    };

    // Tests buffer lengths for both channel layouts
    // Verified by swapping the channel counts
    #[test]
    fn test_buffer_len_per_layout() {
        assert_eq!(ChannelLayout::Rgb.buffer_len(256), 196_608);
        assert_eq!(ChannelLayout::Rgba.buffer_len(256), 262_144);
        assert_eq!(ChannelLayout::Rgb.channels(), 3);
        assert_eq!(ChannelLayout::Rgba.channels(), 4);
    }

    // Tests encoded bytes are row-major and channel-interleaved
    // Verified by transposing the pixel loop in encode
    #[test]
    fn test_encode_is_row_major() {
        let mut image = RgbImage::new(2, 2);
        image.put_pixel(1, 0, Rgb([1, 2, 3]));
        image.put_pixel(0, 1, Rgb([4, 5, 6]));

        let buffer = encode(&image);

        assert_eq!(
            buffer.as_bytes(),
            &[0, 0, 0, 1, 2, 3, 4, 5, 6, 0, 0, 0]
        );
    }

    // Tests RGBA pixels keep their alpha through the codec
    // Verified by decoding as RGB
    #[test]
    fn test_rgba_decode_keeps_alpha() {
        let image = RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 128]));

        let decoded = decode::<Rgba<u8>>(encode(&image), 4).unwrap();

        assert_eq!(decoded.get_pixel(3, 3), &Rgba([10, 20, 30, 128]));
    }

    // Tests decoding rejects a buffer of the wrong length
    // Verified by removing the length check
    #[test]
    fn test_decode_size_mismatch() {
        let buffer = RawBuffer::from_bytes(vec![0; 47]);

        match decode::<Rgb<u8>>(buffer, 4) {
            Err(WangError::SizeMismatch { expected, actual }) => {
                assert_eq!(expected, 48);
                assert_eq!(actual, 47);
            }
            other => panic!("expected SizeMismatch, got {other:?}"),
        }
    }

    // Tests side inference is exact integer floor(sqrt(len / channels))
    // Verified by using float sqrt rounding up
    #[test]
    fn test_infer_side() {
        assert_eq!(infer_side(196_608, 3), 256);
        assert_eq!(infer_side(128 * 128 * 3, 3), 128);
        assert_eq!(infer_side(5 * 5 * 3 - 1, 3), 4);
        assert_eq!(infer_side(0, 3), 0);
        assert_eq!(infer_side(12, 0), 0);
    }

    // Tests inferred decoding rejects lengths that are not square pixel counts
    // Verified by accepting any length divisible by three
    #[test]
    fn test_decode_inferred_rejects_non_square() {
        let square = RawBuffer::from_bytes(vec![7; 16 * 16 * 3]);
        let image = decode_inferred_rgb(square).unwrap();
        assert_eq!(image.dimensions(), (16, 16));

        let ragged = RawBuffer::from_bytes(vec![7; 16 * 17 * 3]);
        assert!(matches!(
            decode_inferred_rgb(ragged),
            Err(WangError::SizeMismatch { .. })
        ));
    }

    // Tests buffer files are written and read back unchanged
    // Verified by appending a header on write
    #[test]
    fn test_read_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buffer.img");
        let buffer = RawBuffer::from_bytes((0..=255).collect());

        buffer.write(&path).unwrap();
        let read = RawBuffer::read(&path).unwrap();

        assert_eq!(read, buffer);
        assert_eq!(read.len(), 256);
        assert!(!read.is_empty());
    }

    // Tests reading a missing buffer reports the path
    // Verified by mapping to the generic From conversion
    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.img");

        match RawBuffer::read(&path) {
            Err(WangError::FileSystem {
                path: reported,
                operation,
                ..
            }) => {
                assert_eq!(reported, path);
                assert_eq!(operation, "read buffer");
            }
            other => panic!("expected FileSystem error, got {other:?}"),
        }
    }
}
