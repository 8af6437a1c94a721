use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts, HeaderMap, HeaderName};
use std::convert::Infallible;
use std::sync::Arc;
use uuid::Uuid;

use crate::state::{AppState, SharedDesk};

pub const SESSION_COOKIE: &str = "revisor_session";

/// The desk belonging to the browser that sent the request.
pub struct Session {
    pub id: Uuid,
    pub desk: SharedDesk,
    is_new: bool,
}

impl Session {
    /// `Set-Cookie` header, present only when the session was just opened.
    pub fn set_cookie(&self) -> Option<(HeaderName, String)> {
        self.is_new.then(|| {
            (
                header::SET_COOKIE,
                format!(
                    "{}={}; Path=/; HttpOnly; SameSite=Lax",
                    SESSION_COOKIE, self.id
                ),
            )
        })
    }
}

pub fn session_id_from(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value).ok())
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        if let Some(id) = session_id_from(&parts.headers) {
            if let Some(desk) = state.desk_for(&id).await {
                return Ok(Session {
                    id,
                    desk,
                    is_new: false,
                });
            }
        }

        // Unknown or missing cookie: never adopt an id the client picked.
        let (id, desk) = state.open_session().await;
        Ok(Session {
            id,
            desk,
            is_new: true,
        })
    }
}
