use serde::Serialize;

use crate::render::{RecentList, ReviewPanel};

/// Everything the controller can do to the screen.
pub trait View: Send {
    fn show_progress(&mut self);
    fn hide_progress(&mut self);
    /// Reveals the results area with `panel`, replacing whatever was shown.
    fn show_review(&mut self, panel: ReviewPanel);
    fn hide_review(&mut self);
    fn scroll_to_results(&mut self);
    fn show_recent(&mut self, list: RecentList);
    /// Blocking, user-visible message.
    fn alert(&mut self, message: String);
}

/// Keeps the progress indicator up for as long as it lives.
pub struct ProgressGuard<'a, V: View> {
    view: &'a mut V,
}

impl<'a, V: View> ProgressGuard<'a, V> {
    pub fn show(view: &'a mut V) -> Self {
        view.show_progress();
        Self { view }
    }
}

impl<V: View> Drop for ProgressGuard<'_, V> {
    fn drop(&mut self) {
        self.view.hide_progress();
    }
}

/// Screen state of the dashboard page, filled by the controller and read by
/// the template on every render.
#[derive(Debug, Default)]
pub struct DashboardView {
    progress_visible: bool,
    review: Option<ReviewPanel>,
    recent: Option<RecentList>,
    alert: Option<String>,
    scroll_pending: bool,
}

/// One rendered frame. Alerts and scroll requests are delivered once.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardFrame {
    pub progress_visible: bool,
    pub review: Option<ReviewPanel>,
    pub recent: Option<RecentList>,
    pub alert: Option<String>,
    pub scroll_to_results: bool,
}

impl DashboardView {
    pub fn progress_visible(&self) -> bool {
        self.progress_visible
    }

    pub fn take_frame(&mut self) -> DashboardFrame {
        DashboardFrame {
            progress_visible: self.progress_visible,
            review: self.review.clone(),
            recent: self.recent.clone(),
            alert: self.alert.take(),
            scroll_to_results: std::mem::take(&mut self.scroll_pending),
        }
    }
}

impl View for DashboardView {
    fn show_progress(&mut self) {
        self.progress_visible = true;
    }

    fn hide_progress(&mut self) {
        self.progress_visible = false;
    }

    fn show_review(&mut self, panel: ReviewPanel) {
        self.review = Some(panel);
    }

    fn hide_review(&mut self) {
        self.review = None;
        self.scroll_pending = false;
    }

    fn scroll_to_results(&mut self) {
        self.scroll_pending = true;
    }

    fn show_recent(&mut self, list: RecentList) {
        self.recent = Some(list);
    }

    fn alert(&mut self, message: String) {
        self.alert = Some(message);
    }
}
