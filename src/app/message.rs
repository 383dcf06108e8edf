// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::UploadOutcome;
use crate::error::Error;
use crate::ui::{gallery, text_entry, viewer};

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    Viewer(viewer::Message),
    TextEntry(text_entry::Message),
    /// An upload finished. It may outlive the viewer that started it, so it
    /// is handled at the root and tagged with the photo it was made from.
    UploadFinished {
        original: String,
        result: Result<UploadOutcome, Error>,
    },
}

/// Runtime flags passed from the command line.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Directory holding `settings.toml`.
    /// Takes precedence over `GALLERY_EDITOR_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Replaces `[api] images_url` for this run.
    pub images_url: Option<String>,
    /// Replaces `[upload] target_url` for this run.
    pub upload_url: Option<String>,
}
