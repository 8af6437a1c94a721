//! Tests for the review desk controller.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use super::*;
use crate::models::{HealthStatus, RecentReviewSummary, TextReviewRequest};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    SubmitFile(String),
    SubmitText(TextReviewRequest),
    Recent(u32),
    Review(ReviewId),
    Delete(ReviewId),
    Health,
}

#[derive(Default)]
struct FakeApi {
    calls: Mutex<Vec<Call>>,
    reviews: Mutex<VecDeque<Result<ReviewResult, TransportError>>>,
    recent: Mutex<VecDeque<Result<Vec<RecentReviewSummary>, TransportError>>>,
    delete: Mutex<Option<TransportError>>,
}

impl FakeApi {
    fn with_review(self, review: Result<ReviewResult, TransportError>) -> Self {
        self.reviews.lock().unwrap().push_back(review);
        self
    }

    fn with_recent(self, recent: Result<Vec<RecentReviewSummary>, TransportError>) -> Self {
        self.recent.lock().unwrap().push_back(recent);
        self
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_review(&self) -> Result<ReviewResult, TransportError> {
        self.reviews
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(TransportError::Status { status: 500 }))
    }
}

#[async_trait]
impl ReviewApi for FakeApi {
    async fn submit_file(
        &self,
        filename: &str,
        _bytes: Vec<u8>,
    ) -> Result<ReviewResult, TransportError> {
        self.record(Call::SubmitFile(filename.to_string()));
        self.next_review()
    }

    async fn submit_text(
        &self,
        request: &TextReviewRequest,
    ) -> Result<ReviewResult, TransportError> {
        self.record(Call::SubmitText(request.clone()));
        self.next_review()
    }

    async fn recent_reviews(&self, limit: u32) -> Result<Vec<RecentReviewSummary>, TransportError> {
        self.record(Call::Recent(limit));
        self.recent
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    async fn review(&self, id: ReviewId) -> Result<ReviewResult, TransportError> {
        self.record(Call::Review(id));
        self.next_review()
    }

    async fn delete_review(&self, id: ReviewId) -> Result<(), TransportError> {
        self.record(Call::Delete(id));
        match self.delete.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn health(&self) -> Result<HealthStatus, TransportError> {
        self.record(Call::Health);
        Ok(HealthStatus {
            status: "healthy".into(),
            service: Some("Code Review Assistant".into()),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    ShowProgress,
    HideProgress,
    ShowReview(ReviewId),
    HideReview,
    Scroll,
    Recent(RecentList),
    Alert(String),
}

#[derive(Default)]
struct RecordingView {
    events: Vec<Event>,
    progress_visible: bool,
}

impl RecordingView {
    fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Alert(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    fn shown_reviews(&self) -> Vec<ReviewId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::ShowReview(id) => Some(*id),
                _ => None,
            })
            .collect()
    }
}

impl View for RecordingView {
    fn show_progress(&mut self) {
        self.progress_visible = true;
        self.events.push(Event::ShowProgress);
    }

    fn hide_progress(&mut self) {
        self.progress_visible = false;
        self.events.push(Event::HideProgress);
    }

    fn show_review(&mut self, panel: ReviewPanel) {
        self.events.push(Event::ShowReview(panel.id));
    }

    fn hide_review(&mut self) {
        self.events.push(Event::HideReview);
    }

    fn scroll_to_results(&mut self) {
        self.events.push(Event::Scroll);
    }

    fn show_recent(&mut self, list: RecentList) {
        self.events.push(Event::Recent(list));
    }

    fn alert(&mut self, message: String) {
        self.events.push(Event::Alert(message));
    }
}

fn review(id: ReviewId, filename: &str) -> ReviewResult {
    ReviewResult {
        id,
        filename: filename.to_string(),
        readability_score: 8.5,
        modularity_score: 6.5,
        bug_risk_score: 4.5,
        overall_score: 6.9,
        review_report: "Readable code.".into(),
        suggestions: "Add tests\n\nUse constants".into(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
    }
}

fn summary(id: ReviewId, filename: &str) -> RecentReviewSummary {
    RecentReviewSummary {
        id,
        filename: filename.to_string(),
        overall_score: 6.9,
        created_at: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
    }
}

fn desk(api: FakeApi) -> ReviewDesk<FakeApi, RecordingView> {
    ReviewDesk::new(api, RecordingView::default())
}

#[tokio::test]
async fn empty_form_alerts_without_network() {
    let mut desk = desk(FakeApi::default());

    let err = desk.submit_code().await.unwrap_err();

    assert_eq!(err, DeskError::Validation(ValidationError::MissingInput));
    assert!(desk.api().calls().is_empty());
    assert_eq!(
        desk.view().alerts(),
        vec!["Please either upload a file or provide both filename and code content."]
    );
    assert!(!desk.view().events.contains(&Event::ShowProgress));
}

#[tokio::test]
async fn filename_only_alerts_without_network() {
    let mut desk = desk(FakeApi::default());
    desk.form_mut().set_text("main.py", "");

    let err = desk.submit_code().await.unwrap_err();

    assert!(matches!(err, DeskError::Validation(_)));
    assert!(desk.api().calls().is_empty());
}

#[tokio::test]
async fn blank_file_alerts_without_network() {
    let mut desk = desk(FakeApi::default());
    desk.select_file(SelectedFile::new("blank.py", "\n\n   "));

    let err = desk.submit_code().await.unwrap_err();

    assert_eq!(err, DeskError::Validation(ValidationError::EmptyContent));
    assert!(desk.api().calls().is_empty());
    assert_eq!(desk.view().alerts(), vec!["Please provide code content to review."]);
}

#[tokio::test]
async fn file_takes_precedence_over_typed_fields() {
    let api = FakeApi::default().with_review(Ok(review(1, "upload.rs")));
    let mut desk = desk(api);
    desk.select_file(SelectedFile::new("upload.rs", "fn main() {}"));
    desk.form_mut().set_text("typed.py", "print(1)");

    desk.submit_code().await.expect("submit should succeed");

    assert_eq!(
        desk.api().calls(),
        vec![Call::SubmitFile("upload.rs".into()), Call::Recent(RECENT_REVIEWS_LIMIT)]
    );
}

#[tokio::test]
async fn successful_text_submit_renders_sets_cursor_and_refreshes_list() {
    let api = FakeApi::default()
        .with_review(Ok(review(42, "main.py")))
        .with_recent(Ok(vec![summary(42, "main.py")]));
    let mut desk = desk(api);
    desk.form_mut().set_text(" main.py ", " print('hi') ");

    let result = desk.submit_code().await.expect("submit should succeed");

    assert_eq!(result.id, 42);
    assert_eq!(desk.current_review_id(), Some(42));
    assert_eq!(
        desk.api().calls(),
        vec![
            Call::SubmitText(TextReviewRequest {
                filename: "main.py".into(),
                content: "print('hi')".into(),
            }),
            Call::Recent(5),
        ]
    );

    let events = &desk.view().events;
    assert_eq!(events[0], Event::ShowProgress);
    assert_eq!(events[1], Event::HideProgress);
    assert_eq!(events[2], Event::ShowReview(42));
    assert_eq!(events[3], Event::Scroll);
    assert!(matches!(events[4], Event::Recent(RecentList::Entries(_))));
    assert!(!desk.view().progress_visible);
}

#[tokio::test]
async fn failed_submit_alerts_and_keeps_display() {
    let api = FakeApi::default()
        .with_review(Ok(review(7, "old.py")))
        .with_review(Err(TransportError::Status { status: 500 }));
    let mut desk = desk(api);
    desk.load_review(7).await.expect("load should succeed");
    desk.form_mut().set_text("new.py", "x = 1");

    let err = desk.submit_code().await.unwrap_err();

    assert_eq!(err, DeskError::Transport(TransportError::Status { status: 500 }));
    assert_eq!(desk.current_review_id(), Some(7));
    assert_eq!(desk.view().shown_reviews(), vec![7]);
    assert_eq!(
        desk.view().alerts(),
        vec!["Error reviewing code: HTTP error! status: 500"]
    );
    assert!(!desk.view().progress_visible);
    assert!(!desk.api().calls().contains(&Call::Recent(5)));
}

#[tokio::test]
async fn recent_failure_is_silent_and_keeps_last_list() {
    let api = FakeApi::default()
        .with_recent(Ok(vec![summary(1, "a.rs")]))
        .with_recent(Err(TransportError::Network("connection refused".into())));
    let mut desk = desk(api);

    desk.load_recent_reviews().await;
    desk.load_recent_reviews().await;

    let recent_events = desk
        .view()
        .events
        .iter()
        .filter(|e| matches!(e, Event::Recent(_)))
        .count();
    assert_eq!(recent_events, 1);
    assert!(desk.view().alerts().is_empty());
}

#[tokio::test]
async fn empty_recent_list_shows_placeholder() {
    let mut desk = desk(FakeApi::default().with_recent(Ok(Vec::new())));

    desk.load_recent_reviews().await;

    assert_eq!(desk.view().events, vec![Event::Recent(RecentList::Empty)]);
}

#[tokio::test]
async fn failed_load_review_keeps_cursor() {
    let api = FakeApi::default()
        .with_review(Ok(review(3, "a.py")))
        .with_review(Err(TransportError::Status { status: 404 }));
    let mut desk = desk(api);
    desk.load_review(3).await.expect("first load should succeed");

    let err = desk.load_review(99).await.unwrap_err();

    assert!(matches!(err, DeskError::Transport(_)));
    assert_eq!(desk.current_review_id(), Some(3));
    assert_eq!(desk.view().shown_reviews(), vec![3]);
    assert_eq!(
        desk.view().alerts(),
        vec!["Error loading review: HTTP error! status: 404"]
    );
}

#[tokio::test]
async fn clear_form_resets_everything() {
    let api = FakeApi::default().with_review(Ok(review(3, "a.py")));
    let mut desk = desk(api);
    desk.load_review(3).await.expect("load should succeed");
    desk.select_file(SelectedFile::new("b.py", "pass"));

    desk.clear_form();

    assert_eq!(desk.current_review_id(), None);
    assert_eq!(desk.form(), &FormState::default());
    assert_eq!(desk.view().events.last(), Some(&Event::HideReview));
    assert!(desk.api().calls().iter().all(|c| *c == Call::Review(3)));
}

#[tokio::test]
async fn clear_form_on_fresh_desk_is_harmless() {
    let mut desk = desk(FakeApi::default());
    desk.clear_form();
    assert_eq!(desk.current_review_id(), None);
    assert_eq!(desk.view().events, vec![Event::HideReview]);
}

#[tokio::test]
async fn deleting_displayed_review_hides_it() {
    let api = FakeApi::default().with_review(Ok(review(4, "a.py")));
    let mut desk = desk(api);
    desk.load_review(4).await.expect("load should succeed");

    desk.delete_review(4).await.expect("delete should succeed");

    assert_eq!(desk.current_review_id(), None);
    assert!(desk.view().events.contains(&Event::HideReview));
    assert_eq!(desk.api().calls().last(), Some(&Call::Recent(5)));
}

#[tokio::test]
async fn deleting_other_review_keeps_display() {
    let api = FakeApi::default().with_review(Ok(review(4, "a.py")));
    let mut desk = desk(api);
    desk.load_review(4).await.expect("load should succeed");

    desk.delete_review(9).await.expect("delete should succeed");

    assert_eq!(desk.current_review_id(), Some(4));
    assert!(!desk.view().events.contains(&Event::HideReview));
}

#[tokio::test]
async fn failed_delete_alerts() {
    let api = FakeApi::default();
    *api.delete.lock().unwrap() = Some(TransportError::Status { status: 404 });
    let mut desk = desk(api);

    let err = desk.delete_review(1).await.unwrap_err();

    assert!(matches!(err, DeskError::Transport(_)));
    assert_eq!(
        desk.view().alerts(),
        vec!["Error deleting review: HTTP error! status: 404"]
    );
    assert_eq!(desk.api().calls(), vec![Call::Delete(1)]);
}

#[tokio::test]
async fn check_backend_reports_health() {
    let desk = desk(FakeApi::default());
    assert!(desk.check_backend().await);
    assert_eq!(desk.api().calls(), vec![Call::Health]);
}
