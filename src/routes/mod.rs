mod api;
mod pages;

pub use api::{check_status, health};
pub use pages::{clear_form, delete_review, index, load_review, select_file, submit_code};

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tera::Context;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::render::NO_RECENT_REVIEWS;
use crate::session::Session;
use crate::state::{AppState, Desk};
use crate::templates::{get_tera, DASHBOARD};
use crate::view::View;

pub fn router(state: Arc<AppState>) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit_code))
        .route("/select", post(select_file))
        .route("/clear", post(clear_form))
        .route("/reviews/:review_id", get(load_review))
        .route("/reviews/:review_id/delete", post(delete_review))
        .route("/api/status", get(check_status))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn render_dashboard(state: &AppState, desk: &mut Desk) -> Html<String> {
    let frame = desk.view_mut().take_frame();

    let mut ctx = Context::new();
    ctx.insert("view", &frame);
    ctx.insert("form", &desk.form().snapshot());
    ctx.insert("cursor", &desk.current_review_id());
    ctx.insert("empty_message", NO_RECENT_REVIEWS);

    let tera = get_tera(&state.config.template_dir);
    match tera.render(DASHBOARD, &ctx) {
        Ok(rendered) => Html(rendered),
        Err(e) => {
            tracing::error!("Failed to render {}: {}", DASHBOARD, e);
            // Keep the alert for the next successful render.
            if let Some(message) = frame.alert {
                desk.view_mut().alert(message);
            }
            Html(format!("Template error: {}", DASHBOARD))
        }
    }
}

/// Dashboard page, plus the session cookie when the session was just opened.
fn dashboard_response(session: &Session, status: StatusCode, html: Html<String>) -> Response {
    (status, AppendHeaders(session.set_cookie()), html).into_response()
}
