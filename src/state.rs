use crate::api::HttpReviewApi;
use crate::config::Config;
use crate::desk::ReviewDesk;
use crate::view::DashboardView;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

pub type Desk = ReviewDesk<HttpReviewApi, DashboardView>;
pub type SharedDesk = Arc<Mutex<Desk>>;

/// Shared by all requests. Every browser session gets its own desk; only the
/// HTTP client is shared between them.
pub struct AppState {
    pub config: Arc<Config>,
    api: HttpReviewApi,
    sessions: Mutex<HashMap<Uuid, SharedDesk>>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        let api = HttpReviewApi::new(&config.review_api_url);
        Self {
            config,
            api,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn api(&self) -> &HttpReviewApi {
        &self.api
    }

    pub async fn desk_for(&self, session_id: &Uuid) -> Option<SharedDesk> {
        self.sessions.lock().await.get(session_id).cloned()
    }

    pub async fn open_session(&self) -> (Uuid, SharedDesk) {
        let session_id = Uuid::new_v4();
        let desk = Arc::new(Mutex::new(ReviewDesk::new(
            self.api.clone(),
            DashboardView::default(),
        )));

        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id, desk.clone());
        tracing::info!("Opened session {} ({} active)", session_id, sessions.len());

        (session_id, desk)
    }
}
