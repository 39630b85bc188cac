//! Resolution changes between the full tile resolution and the graph cut scale

use image::{Rgb, RgbImage};
use ndarray::Array2;

/// Halve an image by averaging each 2x2 block
///
/// Odd trailing rows and columns are dropped.
pub fn downsample(image: &RgbImage) -> RgbImage {
    let (width, height) = (image.width() / 2, image.height() / 2);
    RgbImage::from_fn(width, height, |x, y| {
        let mut sum = [0u32; 3];
        for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
            if let Some(pixel) = image.get_pixel_checked(x * 2 + dx, y * 2 + dy) {
                for (acc, &channel) in sum.iter_mut().zip(pixel.0.iter()) {
                    *acc += u32::from(channel);
                }
            }
        }
        Rgb(sum.map(|acc| ((acc + 2) / 4) as u8))
    })
}

/// Apply [`downsample`] `iterations` times
pub fn downsample_by(image: &RgbImage, iterations: u32) -> RgbImage {
    let mut current = image.clone();
    for _ in 0..iterations {
        current = downsample(&current);
    }
    current
}

/// Double a mask by repeating every value into a 2x2 block
pub fn upsample_mask(mask: &Array2<u8>) -> Array2<u8> {
    let (rows, cols) = mask.dim();
    Array2::from_shape_fn((rows * 2, cols * 2), |(row, col)| {
        mask.get((row / 2, col / 2)).copied().unwrap_or(0)
    })
}

/// Apply [`upsample_mask`] `iterations` times
pub fn upsample_mask_by(mask: &Array2<u8>, iterations: u32) -> Array2<u8> {
    let mut current = mask.clone();
    for _ in 0..iterations {
        current = upsample_mask(&current);
    }
    current
}
