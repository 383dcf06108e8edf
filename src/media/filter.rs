// SPDX-License-Identifier: MPL-2.0
//! Built-in image filters.
//!
//! A [`FilterDescriptor`] names one filter and optionally carries a single
//! scalar parameter. Each call to [`apply_filter`] runs exactly one filter and
//! returns a new image; nothing is cached or composed.
//!
//! # Example
//!
//! ```
//! use gallery_editor::media::filter::{apply_filter, FilterPreset};
//! use image_rs::{DynamicImage, RgbaImage};
//!
//! let image = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
//! let blurred = apply_filter(&image, &FilterPreset::Blur.descriptor()).unwrap();
//! assert_eq!(blurred.width(), 8);
//! ```

use crate::app::config::{BLUR_RADIUS, SEPIA_INTENSITY};
use crate::error::{Error, Result};
use image_rs::DynamicImage;
use std::fmt;

pub const SEPIA_TONE: &str = "CISepiaTone";
pub const PHOTO_EFFECT_PROCESS: &str = "CIPhotoEffectProcess";
pub const GAUSSIAN_BLUR: &str = "CIGaussianBlur";
pub const PHOTO_EFFECT_NOIR: &str = "CIPhotoEffectNoir";

pub const INTENSITY_KEY: &str = "inputIntensity";
pub const RADIUS_KEY: &str = "inputRadius";

const DEFAULT_INTENSITY: f32 = 1.0;
const DEFAULT_RADIUS: f32 = 10.0;
const NOIR_CONTRAST: f32 = 1.35;
const PROCESS_CONTRAST: f32 = 1.1;

/// One scalar filter input.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterParameter {
    pub key: String,
    pub value: f32,
}

/// Selects and parametrizes a single filter call.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterDescriptor {
    pub name: String,
    pub parameter: Option<FilterParameter>,
}

impl FilterDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameter: None,
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: f32) -> Self {
        self.parameter = Some(FilterParameter {
            key: key.into(),
            value,
        });
        self
    }

    /// Returns the parameter value when it is present under `key`.
    ///
    /// A parameter stored under a different key is rejected.
    fn parameter(&self, key: &str) -> Result<Option<f32>> {
        match &self.parameter {
            None => Ok(None),
            Some(param) if param.key == key => Ok(Some(param.value)),
            Some(param) => Err(Error::Filter(format!(
                "{} does not accept parameter {}",
                self.name, param.key
            ))),
        }
    }
}

/// The fixed presets offered in the edit menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterPreset {
    Sepia,
    PhotoEffect,
    Blur,
    Noir,
}

impl FilterPreset {
    pub const ALL: [FilterPreset; 4] = [
        FilterPreset::Sepia,
        FilterPreset::PhotoEffect,
        FilterPreset::Blur,
        FilterPreset::Noir,
    ];

    #[must_use]
    pub fn descriptor(self) -> FilterDescriptor {
        match self {
            FilterPreset::Sepia => {
                FilterDescriptor::new(SEPIA_TONE).with_parameter(INTENSITY_KEY, SEPIA_INTENSITY)
            }
            FilterPreset::PhotoEffect => FilterDescriptor::new(PHOTO_EFFECT_PROCESS),
            FilterPreset::Blur => {
                FilterDescriptor::new(GAUSSIAN_BLUR).with_parameter(RADIUS_KEY, BLUR_RADIUS)
            }
            FilterPreset::Noir => FilterDescriptor::new(PHOTO_EFFECT_NOIR),
        }
    }

    /// i18n key of the menu label.
    #[must_use]
    pub fn label_key(self) -> &'static str {
        match self {
            FilterPreset::Sepia => "action-sepia",
            FilterPreset::PhotoEffect => "action-photo-effect",
            FilterPreset::Blur => "action-blur",
            FilterPreset::Noir => "action-noir",
        }
    }
}

impl fmt::Display for FilterPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterPreset::Sepia => "sepia",
            FilterPreset::PhotoEffect => "photo_effect",
            FilterPreset::Blur => "blur",
            FilterPreset::Noir => "noir",
        };
        f.write_str(name)
    }
}

/// Runs the filter named by `descriptor` on `image`.
pub fn apply_filter(image: &DynamicImage, descriptor: &FilterDescriptor) -> Result<DynamicImage> {
    match descriptor.name.as_str() {
        SEPIA_TONE => {
            let intensity = descriptor
                .parameter(INTENSITY_KEY)?
                .unwrap_or(DEFAULT_INTENSITY);
            Ok(sepia(image, intensity))
        }
        GAUSSIAN_BLUR => {
            let radius = descriptor.parameter(RADIUS_KEY)?.unwrap_or(DEFAULT_RADIUS);
            Ok(gaussian_blur(image, radius))
        }
        PHOTO_EFFECT_PROCESS => {
            descriptor.parameter("")?;
            Ok(photo_process(image))
        }
        PHOTO_EFFECT_NOIR => {
            descriptor.parameter("")?;
            Ok(noir(image))
        }
        other => Err(Error::Filter(format!("unknown filter {other}"))),
    }
}

/// Applies `f` to the RGB channels of every pixel, keeping alpha.
fn map_rgb(image: &DynamicImage, f: impl Fn([f32; 3]) -> [f32; 3]) -> DynamicImage {
    let mut rgba = image.to_rgba8();
    for pixel in rgba.pixels_mut() {
        let [r, g, b, a] = pixel.0;
        let [r, g, b] = f([f32::from(r), f32::from(g), f32::from(b)]);
        pixel.0 = [to_channel(r), to_channel(g), to_channel(b), a];
    }
    DynamicImage::ImageRgba8(rgba)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn contrast(value: f32, factor: f32) -> f32 {
    (value - 127.5) * factor + 127.5
}

fn sepia(image: &DynamicImage, intensity: f32) -> DynamicImage {
    let intensity = intensity.clamp(0.0, 1.0);
    map_rgb(image, |[r, g, b]| {
        let sr = 0.393 * r + 0.769 * g + 0.189 * b;
        let sg = 0.349 * r + 0.686 * g + 0.168 * b;
        let sb = 0.272 * r + 0.534 * g + 0.131 * b;
        [
            r + (sr - r) * intensity,
            g + (sg - g) * intensity,
            b + (sb - b) * intensity,
        ]
    })
}

fn gaussian_blur(image: &DynamicImage, radius: f32) -> DynamicImage {
    if radius <= 0.0 {
        return image.clone();
    }
    image.blur(radius)
}

/// Cool, slightly punchier rendition.
fn photo_process(image: &DynamicImage) -> DynamicImage {
    map_rgb(image, |[r, g, b]| {
        [
            contrast(r * 0.92, PROCESS_CONTRAST),
            contrast(g * 0.98 + 4.0, PROCESS_CONTRAST),
            contrast(b * 1.06 + 10.0, PROCESS_CONTRAST),
        ]
    })
}

/// High-contrast black and white.
fn noir(image: &DynamicImage) -> DynamicImage {
    map_rgb(image, |[r, g, b]| {
        let luma = contrast(0.299 * r + 0.587 * g + 0.114 * b, NOIR_CONTRAST);
        [luma, luma, luma]
    })
}
