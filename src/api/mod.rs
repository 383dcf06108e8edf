// SPDX-License-Identifier: MPL-2.0
//! HTTP access to the image service.
//!
//! [`ApiClient`] is cheap to clone and is moved into each `Task::perform`
//! future. Calls are independent: nothing is retried, cancelled or ordered.

pub mod multipart;
pub mod types;

pub use multipart::{generate_boundary, MultipartBody};
pub use types::{ImageRecord, UploadOutcome, UploadRequest, UploadUrlResponse};

use crate::app::config::{self, Config};
use crate::error::{Error, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Response, Url};
use std::sync::Arc;

/// Endpoints and credentials used by [`ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub images_url: String,
    pub upload_url_endpoint: String,
    /// Sent verbatim as the `Authorization` header of uploads.
    pub authorization: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            images_url: config::DEFAULT_IMAGES_URL.to_string(),
            upload_url_endpoint: config::DEFAULT_UPLOAD_URL_ENDPOINT.to_string(),
            authorization: config::DEFAULT_AUTHORIZATION.to_string(),
        }
    }
}

impl From<&Config> for ApiSettings {
    fn from(config: &Config) -> Self {
        Self {
            images_url: config.api.images_url.clone(),
            upload_url_endpoint: config.api.upload_url_endpoint.clone(),
            authorization: config.upload.authorization.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    settings: Arc<ApiSettings>,
}

impl ApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::limited(10))
            .user_agent(config::USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            settings: Arc::new(settings),
        })
    }

    /// Downloads the list of photos.
    pub async fn fetch_images(&self) -> Result<Vec<ImageRecord>> {
        let response = self.get(&self.settings.images_url).await?;
        let records: Vec<ImageRecord> = response.json().await?;
        tracing::info!(count = records.len(), "Fetched image list");
        Ok(records)
    }

    /// Asks the service where uploads should be posted.
    pub async fn fetch_upload_url(&self) -> Result<String> {
        let response = self.get(&self.settings.upload_url_endpoint).await?;
        let body: UploadUrlResponse = response.json().await?;
        tracing::debug!(url = %body.url, "Resolved upload target");
        Ok(body.url)
    }

    /// Downloads the encoded bytes of one photo.
    pub async fn fetch_image_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self.get(url).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Posts `request` as `multipart/form-data` to `target`.
    pub async fn upload(&self, target: &str, request: &UploadRequest) -> Result<UploadOutcome> {
        let target = parse_url(target)?;
        let form = MultipartBody::new(generate_boundary())
            .text("appid", request.app_id.as_str())
            .text("original", request.original.as_str())
            .media(&request.payload);
        let content_type = form.content_type();
        let body = form.finish();

        tracing::debug!(
            target = %target,
            bytes = body.len(),
            filename = %request.payload.filename,
            "Uploading edited image"
        );

        let response = self
            .client
            .post(target)
            .header(CONTENT_TYPE, content_type)
            .header(AUTHORIZATION, self.settings.authorization.as_str())
            .body(body)
            .send()
            .await?;
        let response = ensure_success(response)?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).ok();
        Ok(UploadOutcome { status, body })
    }

    async fn get(&self, url: &str) -> Result<Response> {
        let url = parse_url(url)?;
        let response = self.client.get(url).send().await?;
        ensure_success(response)
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{url}: {e}")))
}

fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(Error::Http(format!("HTTP status: {status}")))
    }
}
