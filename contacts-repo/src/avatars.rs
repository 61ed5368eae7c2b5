//! Avatar upload adapter for an external image host.
//!
//! Posts the raw image as a multipart form and reads the public URL from the
//! JSON response (`secure_url`, falling back to `url`).

use contacts_types::{AvatarError, AvatarStore};
use reqwest::multipart;
use tracing::instrument;

/// HTTP client for the configured image host.
pub struct ImageHost {
    client: reqwest::Client,
    upload_url: String,
    api_key: Option<String>,
}

impl ImageHost {
    pub fn new(upload_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            upload_url,
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl AvatarStore for ImageHost {
    #[instrument(skip(self, bytes), fields(filename = %filename, size = bytes.len()))]
    async fn upload(
        &self,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AvatarError> {
        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(content_type)
            .map_err(|e| AvatarError::Rejected(format!("Invalid content type: {}", e)))?;

        let form = multipart::Form::new().part("file", part);

        let mut request = self.client.post(&self.upload_url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.header("X-Api-Key", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AvatarError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AvatarError::Upstream(format!(
                "Image host returned HTTP {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AvatarError::Upstream(e.to_string()))?;

        body.get("secure_url")
            .and_then(|v| v.as_str())
            .or_else(|| body.get("url").and_then(|v| v.as_str()))
            .map(str::to_owned)
            .ok_or_else(|| AvatarError::Upstream("Image host response missing secure_url".into()))
    }
}
