// SPDX-License-Identifier: MPL-2.0
//! Decoding downloaded bytes and preparing images for display.

use crate::error::Result;
use iced::widget::image;
use image_rs::{DynamicImage, GenericImageView};

#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: image::Handle,
    pub width: u32,
    pub height: u32,
}

impl ImageData {
    /// Converts a decoded image into an RGBA handle for the image widget.
    #[must_use]
    pub fn from_dynamic(dynamic: &DynamicImage) -> Self {
        let (width, height) = dynamic.dimensions();
        let pixels = dynamic.to_rgba8().into_vec();
        Self {
            handle: image::Handle::from_rgba(width, height, pixels),
            width,
            height,
        }
    }
}

/// Decodes encoded bytes (JPEG, PNG, ...) as returned by the image server.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    Ok(image_rs::load_from_memory(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image_rs::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(image)
            .write_to(&mut buffer, ImageFormat::Png)
            .expect("failed to encode png");
        buffer.into_inner()
    }

    #[test]
    fn decode_png_returns_expected_dimensions() {
        let decoded = decode_image(&png_bytes(4, 2)).expect("png should decode");
        assert_eq!(decoded.dimensions(), (4, 2));
    }

    #[test]
    fn decode_garbage_returns_image_error() {
        match decode_image(b"not an image") {
            Err(Error::Image(message)) => assert!(!message.is_empty()),
            other => panic!("expected Image error, got {other:?}"),
        }
    }

    #[test]
    fn image_data_keeps_dimensions() {
        let decoded = decode_image(&png_bytes(3, 5)).expect("png should decode");
        let data = ImageData::from_dynamic(&decoded);
        assert_eq!((data.width, data.height), (3, 5));
    }
}
