//! The review desk: the controller behind the dashboard.
//!
//! Each operation corresponds to one user interaction. Operations take
//! `&mut self`, so a desk never has two requests in flight.
use thiserror::Error;
use tracing::{error, info, warn};

use crate::api::{ReviewApi, TransportError};
use crate::form::{FormState, SelectedFile, Submission, ValidationError};
use crate::models::{ReviewId, ReviewResult};
use crate::render::{RecentList, ReviewPanel};
use crate::view::{ProgressGuard, View};

pub const RECENT_REVIEWS_LIMIT: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeskError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

pub struct ReviewDesk<A, V> {
    api: A,
    view: V,
    form: FormState,
    current_review_id: Option<ReviewId>,
}

impl<A: ReviewApi, V: View> ReviewDesk<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            form: FormState::default(),
            current_review_id: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn current_review_id(&self) -> Option<ReviewId> {
        self.current_review_id
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        info!("Selected {} ({} bytes)", file.name, file.bytes.len());
        self.form.select_file(file);
    }

    pub async fn submit_code(&mut self) -> Result<ReviewResult, DeskError> {
        let submission = match self.form.to_submission() {
            Ok(submission) => submission,
            Err(e) => {
                self.view.alert(e.to_string());
                return Err(e.into());
            }
        };

        info!("Submitting {} for review", submission.filename());
        let outcome = {
            let _progress = ProgressGuard::show(&mut self.view);
            match submission {
                Submission::File { filename, bytes } => {
                    self.api.submit_file(&filename, bytes).await
                }
                Submission::Text(request) => self.api.submit_text(&request).await,
            }
        };

        let review = match outcome {
            Ok(review) => review,
            Err(e) => {
                error!("Review submission failed: {}", e);
                self.view.alert(format!("Error reviewing code: {}", e));
                return Err(e.into());
            }
        };

        info!("Review {} received for {}", review.id, review.filename);
        self.display(&review);
        self.current_review_id = Some(review.id);
        self.load_recent_reviews().await;

        Ok(review)
    }

    /// Refreshes the recent list. Failures leave the last good list on screen.
    pub async fn load_recent_reviews(&mut self) {
        match self.api.recent_reviews(RECENT_REVIEWS_LIMIT).await {
            Ok(summaries) => self.view.show_recent(RecentList::from_summaries(&summaries)),
            Err(e) => warn!("Error loading recent reviews: {}", e),
        }
    }

    pub async fn load_review(&mut self, id: ReviewId) -> Result<ReviewResult, DeskError> {
        match self.api.review(id).await {
            Ok(review) => {
                self.display(&review);
                self.current_review_id = Some(id);
                Ok(review)
            }
            Err(e) => {
                error!("Error loading review {}: {}", id, e);
                self.view.alert(format!("Error loading review: {}", e));
                Err(e.into())
            }
        }
    }

    pub async fn delete_review(&mut self, id: ReviewId) -> Result<(), DeskError> {
        if let Err(e) = self.api.delete_review(id).await {
            error!("Error deleting review {}: {}", id, e);
            self.view.alert(format!("Error deleting review: {}", e));
            return Err(e.into());
        }

        info!("Deleted review {}", id);
        if self.current_review_id == Some(id) {
            self.view.hide_review();
            self.current_review_id = None;
        }
        self.load_recent_reviews().await;
        Ok(())
    }

    pub fn clear_form(&mut self) {
        self.form.reset();
        self.view.hide_review();
        self.current_review_id = None;
    }

    /// Logs whether the backend answers its health check.
    pub async fn check_backend(&self) -> bool {
        match self.api.health().await {
            Ok(health) => {
                info!(
                    "Review service is {} ({})",
                    health.status,
                    health.service.as_deref().unwrap_or("unknown service")
                );
                true
            }
            Err(e) => {
                warn!("Review service unreachable: {}", e);
                false
            }
        }
    }

    fn display(&mut self, review: &ReviewResult) {
        self.view.show_review(ReviewPanel::from_review(review));
        self.view.scroll_to_results();
    }
}

#[cfg(test)]
mod tests;
