// SPDX-License-Identifier: MPL-2.0
//! Image decoding, editing and encoding.
//!
//! Everything here works on [`image_rs::DynamicImage`] and is independent of the
//! UI; the viewer converts results into [`ImageData`] for display.

pub mod edit;
pub mod filter;
pub mod image;
pub mod navigator;
pub mod payload;
pub mod text_overlay;

pub use edit::EditSession;
pub use filter::{apply_filter, FilterDescriptor, FilterPreset};
pub use image::{decode_image, ImageData};
pub use navigator::GalleryNavigator;
pub use payload::MediaPayload;
pub use text_overlay::{draw_text, TextColor};
