use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{dashboard_response, render_dashboard};
use crate::form::SelectedFile;
use crate::models::ReviewId;
use crate::session::Session;
use crate::state::AppState;
use crate::view::View;

pub async fn index(State(state): State<Arc<AppState>>, session: Session) -> Response {
    let mut desk = session.desk.lock().await;
    desk.load_recent_reviews().await;
    let html = render_dashboard(&state, &mut desk);
    dashboard_response(&session, StatusCode::OK, html)
}

#[derive(Default)]
struct PostedForm {
    file: Option<SelectedFile>,
    filename: String,
    code: String,
}

async fn read_posted_form(mut multipart: Multipart) -> Result<PostedForm, MultipartError> {
    let mut posted = PostedForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "filename" => posted.filename = field.text().await?,
            "code" => posted.code = field.text().await?,
            "file" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                // Browsers post an empty, unnamed part when nothing was picked.
                if file_name.is_empty() {
                    continue;
                }
                let data = field.bytes().await?;
                posted.file = Some(SelectedFile::new(file_name, data.to_vec()));
            }
            _ => {}
        }
    }

    Ok(posted)
}

pub async fn submit_code(
    State(state): State<Arc<AppState>>,
    session: Session,
    multipart: Multipart,
) -> Response {
    let posted = read_posted_form(multipart).await;

    let Ok(mut desk) = session.desk.try_lock() else {
        tracing::warn!("Rejected submission while another request is in flight");
        return (StatusCode::CONFLICT, "A review is already in progress").into_response();
    };

    let posted = match posted {
        Ok(posted) => posted,
        Err(e) => {
            tracing::warn!("Unreadable submission: {}", e);
            desk.view_mut()
                .alert(format!("Error reviewing code: {}", e.body_text()));
            let html = render_dashboard(&state, &mut desk);
            return dashboard_response(&session, e.status(), html);
        }
    };

    desk.form_mut().set_text(posted.filename, posted.code);
    if let Some(file) = posted.file {
        desk.select_file(file);
    }

    // Failures are already on the view as an alert.
    let _ = desk.submit_code().await;

    let html = render_dashboard(&state, &mut desk);
    dashboard_response(&session, StatusCode::OK, html)
}

pub async fn select_file(
    State(state): State<Arc<AppState>>,
    session: Session,
    multipart: Multipart,
) -> Response {
    let posted = read_posted_form(multipart).await;

    let mut desk = session.desk.lock().await;
    let status = match posted {
        Ok(posted) => {
            desk.form_mut().set_text(posted.filename, posted.code);
            if let Some(file) = posted.file {
                desk.select_file(file);
            }
            StatusCode::OK
        }
        Err(e) => {
            tracing::warn!("Unreadable file selection: {}", e);
            desk.view_mut()
                .alert(format!("Error loading file: {}", e.body_text()));
            e.status()
        }
    };

    let html = render_dashboard(&state, &mut desk);
    dashboard_response(&session, status, html)
}

pub async fn load_review(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(review_id): Path<ReviewId>,
) -> Response {
    let mut desk = session.desk.lock().await;
    let _ = desk.load_review(review_id).await;
    let html = render_dashboard(&state, &mut desk);
    dashboard_response(&session, StatusCode::OK, html)
}

pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(review_id): Path<ReviewId>,
) -> Response {
    let mut desk = session.desk.lock().await;
    let _ = desk.delete_review(review_id).await;
    let html = render_dashboard(&state, &mut desk);
    dashboard_response(&session, StatusCode::OK, html)
}

pub async fn clear_form(State(state): State<Arc<AppState>>, session: Session) -> Response {
    let mut desk = session.desk.lock().await;
    desk.clear_form();
    let html = render_dashboard(&state, &mut desk);
    dashboard_response(&session, StatusCode::OK, html)
}
