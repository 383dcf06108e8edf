// SPDX-License-Identifier: MPL-2.0
//! `gallery_editor` browses a remote photo list, applies filters and captions
//! to a photo, and uploads the result as a multipart form.
//!
//! It is built with the Iced GUI framework, localized with Fluent and talks
//! to the image service through `reqwest`.

pub mod api;
pub mod app;
pub mod error;
pub mod i18n;
pub mod media;
pub mod ui;

pub use app::config;

#[cfg(test)]
pub(crate) mod test_utils;
