// SPDX-License-Identifier: MPL-2.0
//! `multipart/form-data` body encoding.
//!
//! Text fields are written first in insertion order, then file parts, then
//! the closing delimiter. Every line ends with CRLF.
//!
//! ```
//! use gallery_editor::api::multipart::MultipartBody;
//!
//! let body = MultipartBody::new("B").text("appid", "me").finish();
//! assert_eq!(
//!     body,
//!     b"--B\r\nContent-Disposition: form-data; name=\"appid\"\r\n\r\nme\r\n--B--\r\n"
//! );
//! ```

use crate::media::MediaPayload;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

const CRLF: &str = "\r\n";

/// Returns a fresh boundary of the form `Boundary-XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX`.
#[must_use]
pub fn generate_boundary() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or_default();
    let mut hasher = blake3::Hasher::new();
    hasher.update(&nanos.to_le_bytes());
    hasher.update(&COUNTER.fetch_add(1, Ordering::Relaxed).to_le_bytes());
    hasher.update(&std::process::id().to_le_bytes());
    let hex = hasher.finalize().to_hex().to_ascii_uppercase();

    format!(
        "Boundary-{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

#[derive(Debug, Clone)]
pub struct MultipartBody<'a> {
    boundary: String,
    fields: Vec<(String, String)>,
    media: Vec<&'a MediaPayload>,
}

impl<'a> MultipartBody<'a> {
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            fields: Vec::new(),
            media: Vec::new(),
        }
    }

    /// Value for the request `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    #[must_use]
    pub fn media(mut self, payload: &'a MediaPayload) -> Self {
        self.media.push(payload);
        self
    }

    #[must_use]
    pub fn finish(&self) -> Vec<u8> {
        let boundary = &self.boundary;
        let mut body = Vec::new();

        for (name, value) in &self.fields {
            body.extend_from_slice(format!("--{boundary}{CRLF}").as_bytes());
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"{CRLF}{CRLF}").as_bytes(),
            );
            body.extend_from_slice(format!("{value}{CRLF}").as_bytes());
        }

        for payload in &self.media {
            body.extend_from_slice(format!("--{boundary}{CRLF}").as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"{CRLF}",
                    payload.key, payload.filename
                )
                .as_bytes(),
            );
            body.extend_from_slice(format!("Content-Type: {}{CRLF}{CRLF}", payload.mime_type).as_bytes());
            body.extend_from_slice(&payload.data);
            body.extend_from_slice(CRLF.as_bytes());
        }

        body.extend_from_slice(format!("--{boundary}--{CRLF}").as_bytes());
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn payload() -> MediaPayload {
        MediaPayload {
            key: "image".to_string(),
            filename: "me_test.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            data: vec![0xFF, 0xD8, 0x00, 0xFF, 0xD9],
        }
    }

    #[test]
    fn body_matches_expected_layout() {
        let media = payload();
        let body = MultipartBody::new("XYZ")
            .media(&media)
            .text("appid", "me")
            .text("original", "https://example.com/a.png")
            .finish();

        let mut expected = Vec::new();
        expected.extend_from_slice(
            b"--XYZ\r\nContent-Disposition: form-data; name=\"appid\"\r\n\r\nme\r\n",
        );
        expected.extend_from_slice(
            b"--XYZ\r\nContent-Disposition: form-data; name=\"original\"\r\n\r\nhttps://example.com/a.png\r\n",
        );
        expected.extend_from_slice(
            b"--XYZ\r\nContent-Disposition: form-data; name=\"image\"; filename=\"me_test.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n",
        );
        expected.extend_from_slice(&[0xFF, 0xD8, 0x00, 0xFF, 0xD9]);
        expected.extend_from_slice(b"\r\n--XYZ--\r\n");

        assert_eq!(body, expected);
    }

    #[test]
    fn empty_body_is_only_the_terminator() {
        assert_eq!(MultipartBody::new("B").finish(), b"--B--\r\n");
    }

    #[test]
    fn content_type_carries_boundary() {
        assert_eq!(
            MultipartBody::new("Boundary-1").content_type(),
            "multipart/form-data; boundary=Boundary-1"
        );
    }

    #[test]
    fn boundary_has_uuid_shape() {
        let boundary = generate_boundary();
        let token = boundary
            .strip_prefix("Boundary-")
            .expect("boundary prefix");
        let groups: Vec<usize> = token.split('-').map(str::len).collect();
        assert_eq!(groups, vec![8, 4, 4, 4, 12]);
        assert!(token
            .chars()
            .all(|c| c == '-' || c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn boundaries_are_unique() {
        let boundaries: HashSet<String> = (0..100).map(|_| generate_boundary()).collect();
        assert_eq!(boundaries.len(), 100);
    }
}
