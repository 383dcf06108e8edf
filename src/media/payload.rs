// SPDX-License-Identifier: MPL-2.0
//! Encoded file part ready for a multipart upload.

use crate::app::config::{MAX_JPEG_QUALITY, MIN_JPEG_QUALITY, UPLOAD_FILE_FIELD, UPLOAD_MIME_TYPE};
use crate::error::Result;
use image_rs::codecs::jpeg::JpegEncoder;
use image_rs::{DynamicImage, ExtendedColorType, ImageEncoder};
use std::fmt;

/// One file part: form field name, filename, MIME type and encoded bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaPayload {
    pub key: String,
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl MediaPayload {
    /// Encodes `image` as JPEG at `quality` (1..=100) under the `image` field.
    ///
    /// Alpha is discarded since JPEG has no transparency.
    pub fn from_image(image: &DynamicImage, filename: impl Into<String>, quality: u8) -> Result<Self> {
        let quality = quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY);
        let rgb = image.to_rgb8();
        let mut data = Vec::new();
        JpegEncoder::new_with_quality(&mut data, quality).write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )?;

        Ok(Self {
            key: UPLOAD_FILE_FIELD.to_string(),
            filename: filename.into(),
            mime_type: UPLOAD_MIME_TYPE.to_string(),
            data,
        })
    }
}

impl fmt::Debug for MediaPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaPayload")
            .field("key", &self.key)
            .field("filename", &self.filename)
            .field("mime_type", &self.mime_type)
            .field("data_len", &self.data.len())
            .finish()
    }
}
