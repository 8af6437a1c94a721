use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::info;

use super::{ReviewApi, TransportError};
use crate::models::{HealthStatus, RecentReviewSummary, ReviewId, ReviewResult, TextReviewRequest};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone)]
pub struct HttpReviewApi {
    client: Client,
    base_url: String,
}

impl HttpReviewApi {
    pub fn new(base_url: &str) -> Self {
        let client = Client::builder()
            .user_agent(format!("revisor/{VERSION}"))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, TransportError> {
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            status: status.as_u16(),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| TransportError::Network(format!("Response read failed: {}", e)))?;

    serde_json::from_str(&text).map_err(|e| TransportError::Decode(e.to_string()))
}

fn network(e: reqwest::Error) -> TransportError {
    TransportError::Network(e.to_string())
}

#[async_trait]
impl ReviewApi for HttpReviewApi {
    async fn submit_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<ReviewResult, TransportError> {
        info!("Uploading {} ({} bytes) for review", filename, bytes.len());

        let mime = mime_guess::from_path(filename).first_or_octet_stream();
        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(mime.essence_str())
            .map_err(network)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/api/review"))
            .multipart(form)
            .send()
            .await
            .map_err(network)?;

        read_json(response).await
    }

    async fn submit_text(
        &self,
        request: &TextReviewRequest,
    ) -> Result<ReviewResult, TransportError> {
        info!(
            "Submitting {} ({} chars) for review",
            request.filename,
            request.content.len()
        );

        let response = self
            .client
            .post(self.url("/api/review-text"))
            .json(request)
            .send()
            .await
            .map_err(network)?;

        read_json(response).await
    }

    async fn recent_reviews(&self, limit: u32) -> Result<Vec<RecentReviewSummary>, TransportError> {
        let response = self
            .client
            .get(self.url("/api/reviews"))
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(network)?;

        read_json(response).await
    }

    async fn review(&self, id: ReviewId) -> Result<ReviewResult, TransportError> {
        let response = self
            .client
            .get(self.url(&format!("/api/reviews/{}", id)))
            .send()
            .await
            .map_err(network)?;

        read_json(response).await
    }

    async fn delete_review(&self, id: ReviewId) -> Result<(), TransportError> {
        let response = self
            .client
            .delete(self.url(&format!("/api/reviews/{}", id)))
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        let response = self
            .client
            .get(self.url("/health"))
            .send()
            .await
            .map_err(network)?;

        read_json(response).await
    }
}
