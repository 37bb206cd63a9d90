// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image decoding — turn encoded PNG/JPEG bytes into the RGB8 raster the PDF
// writer embeds, using the `image` crate.

use image::DynamicImage;
use tracing::{debug, instrument};

/// Longest edge kept for embedded images. Logos and customer photos are
/// printed a few centimetres wide, so larger sources only bloat the PDF.
pub const MAX_EMBED_EDGE_PX: u32 = 600;

/// A decoded raster ready to embed: tightly packed RGB8 rows, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl DecodedImage {
    /// Decode encoded image bytes (PNG or JPEG).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, image::ImageError> {
        let img = image::load_from_memory(data)?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Ok(Self::from_dynamic(img))
    }

    /// Convert an already-decoded image, downscaling it to fit
    /// [`MAX_EMBED_EDGE_PX`] while preserving aspect ratio.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let image = if image.width() > MAX_EMBED_EDGE_PX || image.height() > MAX_EMBED_EDGE_PX {
            let resized = image.resize(
                MAX_EMBED_EDGE_PX,
                MAX_EMBED_EDGE_PX,
                image::imageops::FilterType::Lanczos3,
            );
            debug!(
                new_w = resized.width(),
                new_h = resized.height(),
                "Downscaled for embedding"
            );
            resized
        } else {
            image
        };

        let rgb = image.to_rgb8();
        Self {
            width: rgb.width(),
            height: rgb.height(),
            rgb: rgb.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 60]));
        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut std::io::Cursor::new(&mut buffer), ImageFormat::Png)
            .expect("encode png");
        buffer
    }

    #[test]
    fn decodes_png_to_rgb8() {
        let decoded = DecodedImage::from_bytes(&png_bytes(3, 2)).expect("decode");
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded.rgb.len(), 3 * 2 * 3);
        assert_eq!(&decoded.rgb[..3], &[200, 30, 60]);
    }

    #[test]
    fn large_images_are_downscaled() {
        let decoded = DecodedImage::from_bytes(&png_bytes(1200, 300)).expect("decode");
        assert_eq!(decoded.width, MAX_EMBED_EDGE_PX);
        assert_eq!(decoded.height, 150);
    }

    #[test]
    fn garbage_fails_to_decode() {
        assert!(DecodedImage::from_bytes(b"definitely not an image").is_err());
    }
}
