// SPDX-License-Identifier: MPL-2.0
//! Editing state for the photo shown in the viewer.
//!
//! The session keeps the unfiltered original next to the currently displayed
//! image. Presets and captions are applied to the current image, so they
//! stack; clearing goes back to the original.

use crate::error::Result;
use crate::media::filter::{apply_filter, FilterPreset};
use crate::media::payload::MediaPayload;
use crate::media::text_overlay::{draw_text, TextColor};
use image_rs::DynamicImage;

#[derive(Debug, Clone)]
pub struct EditSession {
    original: DynamicImage,
    current: DynamicImage,
    original_url: Option<String>,
}

impl EditSession {
    #[must_use]
    pub fn new(image: DynamicImage, original_url: Option<String>) -> Self {
        Self {
            current: image.clone(),
            original: image,
            original_url,
        }
    }

    #[must_use]
    pub fn current(&self) -> &DynamicImage {
        &self.current
    }

    #[must_use]
    pub fn original_url(&self) -> Option<&str> {
        self.original_url.as_deref()
    }

    /// True once any preset or caption has been applied since the last clear.
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.current != self.original
    }

    /// Applies `preset` to the current image.
    ///
    /// On error the current image is left as it was.
    pub fn apply_preset(&mut self, preset: FilterPreset) -> Result<()> {
        self.current = apply_filter(&self.current, &preset.descriptor())?;
        Ok(())
    }

    /// Draws `text` onto the current image. Blank text changes nothing.
    pub fn add_text(&mut self, text: &str, color: TextColor) -> Result<()> {
        self.current = draw_text(&self.current, text, color)?;
        Ok(())
    }

    pub fn clear_filters(&mut self) {
        self.current = self.original.clone();
    }

    /// Encodes the current image for upload.
    pub fn upload_payload(&self, filename: &str, quality: u8) -> Result<MediaPayload> {
        MediaPayload::from_image(&self.current, filename, quality)
    }
}
