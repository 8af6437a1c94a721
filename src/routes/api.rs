use axum::{
    response::{AppendHeaders, IntoResponse},
    Json,
};

use crate::session::Session;

/// Reports whether this session's desk is busy with a backend request. A
/// held desk means an operation is in flight.
pub async fn check_status(session: Session) -> impl IntoResponse {
    let body = match session.desk.try_lock() {
        Ok(desk) => serde_json::json!({
            "busy": desk.view().progress_visible(),
            "current_review_id": desk.current_review_id(),
        }),
        Err(_) => serde_json::json!({
            "busy": true,
            "current_review_id": null,
        }),
    };

    (AppendHeaders(session.set_cookie()), Json(body))
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "revisor",
    }))
}
