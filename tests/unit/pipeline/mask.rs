//! Tests for corner pack mask encodings

#[cfg(test)]
mod tests {
    use image::{Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use wangtiles::WangError;
    use wangtiles::engine::mode::Mode;
    use wangtiles::io::buffer::{ChannelLayout, encode};
    use wangtiles::pipeline::mask::MaskSource;

    // Tests the encoding is chosen by mode alone
    // Verified by giving both corner modes the alpha encoding
    #[test]
    fn test_for_mode() {
        assert_eq!(
            MaskSource::for_mode(Mode::TilesCornersConstraints),
            Some(MaskSource::AlphaChannel)
        );
        assert_eq!(
            MaskSource::for_mode(Mode::TilesCorners),
            Some(MaskSource::DuplicatedChannel { channel: 0 })
        );
        assert_eq!(MaskSource::for_mode(Mode::Tiles), None);
        assert_eq!(MaskSource::for_mode(Mode::Index), None);
    }

    // Tests each encoding reads the buffer layout it was written in
    // Verified by swapping the layouts
    #[test]
    fn test_layouts() {
        assert_eq!(MaskSource::AlphaChannel.layout(), ChannelLayout::Rgba);
        assert_eq!(
            MaskSource::DuplicatedChannel { channel: 0 }.layout(),
            ChannelLayout::Rgb
        );
    }

    // Tests alpha channel packs keep colours and take the mask from alpha
    // Verified by reading the mask from red
    #[test]
    fn test_decode_alpha_channel() {
        let pack = RgbaImage::from_fn(4, 4, |x, _| Rgba([10, 20, 30, (x * 85) as u8]));

        let decoded = MaskSource::AlphaChannel.decode(encode(&pack), 4).unwrap();

        assert_eq!(decoded.image(), &pack);
        assert_eq!(decoded.mask().get_pixel(3, 0), &Luma([255]));
        assert_eq!(decoded.overlay().get_pixel(3, 0), &Rgb([10, 20, 30]));
    }

    // Tests duplicated channel packs assert the chosen channel as alpha
    // Verified by leaving alpha opaque
    #[test]
    fn test_decode_duplicated_channel() {
        let pack = RgbImage::from_fn(4, 4, |_, y| Rgb([(y * 80) as u8, 1, 2]));

        let decoded = MaskSource::DuplicatedChannel { channel: 0 }
            .decode(encode(&pack), 4)
            .unwrap();

        assert_eq!(decoded.image().get_pixel(0, 2), &Rgba([160, 1, 2, 160]));
        assert_eq!(decoded.mask().get_pixel(0, 3), &Luma([240]));

        let blue = MaskSource::DuplicatedChannel { channel: 2 }
            .decode(encode(&pack), 4)
            .unwrap();
        assert_eq!(blue.into_image().get_pixel(0, 0).0[3], 2);
    }

    // Tests buffers of the wrong layout or channel are rejected
    // Verified by inferring the layout from the length
    #[test]
    fn test_decode_rejects_mismatch() {
        let rgb = encode(&RgbImage::new(4, 4));

        assert!(matches!(
            MaskSource::AlphaChannel.decode(rgb.clone(), 4),
            Err(WangError::SizeMismatch { .. })
        ));
        assert!(matches!(
            MaskSource::DuplicatedChannel { channel: 3 }.decode(rgb, 4),
            Err(WangError::InvalidParameter { .. })
        ));
    }
}
