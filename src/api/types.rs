// SPDX-License-Identifier: MPL-2.0
//! Wire types exchanged with the image service.

use crate::media::MediaPayload;
use chrono::{DateTime, FixedOffset};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// One entry of the image list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub url: String,
    pub created: String,
    pub updated: String,
}

impl ImageRecord {
    /// The record URL, or `None` when it does not parse.
    #[must_use]
    pub fn parsed_url(&self) -> Option<Url> {
        Url::parse(&self.url).ok()
    }

    /// Creation time when the server sent an RFC 3339 timestamp.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created).ok()
    }

    /// Short creation label for the grid, falling back to the raw string.
    #[must_use]
    pub fn created_label(&self) -> String {
        self.created_at()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| self.created.clone())
    }
}

/// Body of the upload-URL endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadUrlResponse {
    pub url: String,
}

/// Everything posted for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub app_id: String,
    /// URL of the photo the edit started from.
    pub original: String,
    pub payload: MediaPayload,
}

impl UploadRequest {
    pub fn new(app_id: impl Into<String>, original: impl Into<String>, payload: MediaPayload) -> Self {
        Self {
            app_id: app_id.into(),
            original: original.into(),
            payload,
        }
    }
}

/// Status and body returned by the upload target.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    pub status: u16,
    /// Parsed JSON body, `None` when the body is empty or not JSON.
    pub body: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, created: &str) -> ImageRecord {
        ImageRecord {
            url: url.to_string(),
            created: created.to_string(),
            updated: created.to_string(),
        }
    }

    #[test]
    fn deserializes_image_list() {
        let json = r#"[{"url":"https://example.com/1.png","created":"Sun Jan 05 2020","updated":"Sun Jan 05 2020"}]"#;
        let records: Vec<ImageRecord> = serde_json::from_str(json).expect("valid list");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].url, "https://example.com/1.png");
    }

    #[test]
    fn malformed_url_is_none() {
        assert!(record("not a url", "").parsed_url().is_none());
        assert!(record("https://example.com/a.jpg", "").parsed_url().is_some());
    }

    #[test]
    fn created_label_formats_rfc3339() {
        let rec = record("https://example.com", "2021-03-04T05:06:07Z");
        assert_eq!(rec.created_label(), "2021-03-04");
    }

    #[test]
    fn created_label_falls_back_to_raw_value() {
        let rec = record("https://example.com", "Thu Mar 04 2021");
        assert!(rec.created_at().is_none());
        assert_eq!(rec.created_label(), "Thu Mar 04 2021");
    }

    #[test]
    fn upload_url_response_decodes() {
        let body: UploadUrlResponse =
            serde_json::from_str(r#"{"url":"https://up.example.com/x"}"#).expect("valid body");
        assert_eq!(body.url, "https://up.example.com/x");
    }
}
