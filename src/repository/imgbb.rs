use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::domain::types::ImageUrl;
use crate::domain::upload::SelectedFile;
use crate::repository::{ImageHost, UploadError};

/// Upload endpoint reply: `{ success, data: { url }, error: { message } }`.
#[derive(Debug, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<UploadedImage>,
    #[serde(default)]
    pub error: Option<UploadFailure>,
}

#[derive(Debug, Deserialize)]
pub struct UploadedImage {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UploadFailure {
    #[serde(default)]
    pub message: Option<String>,
}

impl UploadResponse {
    /// Extracts the hosted URL; anything but an explicit success with a valid
    /// URL is a failure.
    pub fn into_image_url(self) -> Result<ImageUrl, UploadError> {
        if self.success != Some(true) {
            let message = self
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Failed to upload image".to_string());
            return Err(UploadError::Rejected(message));
        }
        let url = self
            .data
            .and_then(|d| d.url)
            .ok_or(UploadError::Malformed)?;
        ImageUrl::new(url).map_err(|_| UploadError::Malformed)
    }
}

/// Error for a non-2xx reply. The host's own message wins over the status.
fn rejection(status: StatusCode, body: Option<UploadResponse>) -> UploadError {
    let message = body
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| format!("image host responded with {status}"));
    UploadError::Rejected(message)
}

/// ImgBB-compatible image host.
#[derive(Debug, Clone)]
pub struct ImgbbImageHost {
    client: Client,
    upload_url: String,
    api_key: String,
}

impl ImgbbImageHost {
    pub fn new(client: Client, upload_url: &str, api_key: &str) -> Self {
        Self {
            client,
            upload_url: upload_url.to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl ImageHost for ImgbbImageHost {
    async fn upload_image(&self, file: &SelectedFile) -> Result<ImageUrl, UploadError> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new()
            .part("image", part)
            .text("key", self.api_key.clone());

        let response = self
            .client
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<UploadResponse>().await.ok();
            return Err(rejection(status, body));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|_| UploadError::Malformed)?;
        body.into_image_url()
    }
}
