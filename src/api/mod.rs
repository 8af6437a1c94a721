mod http;

pub use http::HttpReviewApi;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{HealthStatus, RecentReviewSummary, ReviewId, ReviewResult, TextReviewRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Network(String),
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("Parse error: {0}")]
    Decode(String),
}

/// The review backend as seen from the dashboard.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// `POST /api/review` with the raw file as multipart field `file`.
    async fn submit_file(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<ReviewResult, TransportError>;

    /// `POST /api/review-text`.
    async fn submit_text(
        &self,
        request: &TextReviewRequest,
    ) -> Result<ReviewResult, TransportError>;

    /// `GET /api/reviews?limit=N`, ordered by the server.
    async fn recent_reviews(&self, limit: u32) -> Result<Vec<RecentReviewSummary>, TransportError>;

    async fn review(&self, id: ReviewId) -> Result<ReviewResult, TransportError>;

    async fn delete_review(&self, id: ReviewId) -> Result<(), TransportError>;

    async fn health(&self) -> Result<HealthStatus, TransportError>;
}
