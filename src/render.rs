// Display contract for reviews and the recent list. Everything here is pure;
// the `View` decides where the result ends up.
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;
use serde::Serialize;

use crate::models::{RecentReviewSummary, ReviewId, ReviewResult};

pub const NO_RECENT_REVIEWS: &str = "No recent reviews";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    Poor,
}

/// Lower bounds checked top to bottom; first match wins.
pub const SCORE_BANDS: &[(f64, ScoreBand)] = &[
    (8.0, ScoreBand::Excellent),
    (6.0, ScoreBand::Good),
    (4.0, ScoreBand::Average),
];

pub fn classify_score(score: f64) -> ScoreBand {
    SCORE_BANDS
        .iter()
        .find(|(lower, _)| score >= *lower)
        .map(|(_, band)| *band)
        .unwrap_or(ScoreBand::Poor)
}

/// One decimal place, ties rounded away from zero.
pub fn format_score(score: f64) -> String {
    // x.25 and x.75 are the only exact ties at one decimal; `{:.1}` would
    // round those to even.
    let quarters = score * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}", (score * 10.0).round() / 10.0);
    }
    format!("{:.1}", score)
}

/// Non-blank lines of the suggestions field, trimmed, in order.
pub fn split_suggestions(raw: &str) -> Vec<String> {
    raw.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

const REVIEW_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Calendar date in the server's local zone, e.g. `3/15/2024`.
pub fn format_review_date(created_at: DateTime<Utc>) -> String {
    format_review_date_in(created_at, &Local)
}

fn format_review_date_in<Tz>(created_at: DateTime<Utc>, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    created_at
        .with_timezone(zone)
        .format(REVIEW_DATE_FORMAT)
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCell {
    pub label: &'static str,
    pub value: String,
    pub band: ScoreBand,
}

impl ScoreCell {
    fn new(label: &'static str, score: f64) -> Self {
        Self {
            label,
            value: format_score(score),
            band: classify_score(score),
        }
    }
}

/// Everything the results area shows for one review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewPanel {
    pub id: ReviewId,
    pub filename: String,
    /// Readability, modularity, bug risk and overall, in that order.
    pub scores: [ScoreCell; 4],
    pub report: String,
    pub suggestions: Vec<String>,
}

impl ReviewPanel {
    pub fn from_review(review: &ReviewResult) -> Self {
        Self {
            id: review.id,
            filename: review.filename.clone(),
            scores: [
                ScoreCell::new("Readability", review.readability_score),
                ScoreCell::new("Modularity", review.modularity_score),
                ScoreCell::new("Bug Risk", review.bug_risk_score),
                ScoreCell::new("Overall", review.overall_score),
            ],
            report: review.review_report.clone(),
            suggestions: split_suggestions(&review.suggestions),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentEntry {
    pub id: ReviewId,
    pub filename: String,
    pub date: String,
    pub score: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "entries", rename_all = "lowercase")]
pub enum RecentList {
    Empty,
    Entries(Vec<RecentEntry>),
}

impl RecentList {
    pub fn from_summaries(summaries: &[RecentReviewSummary]) -> Self {
        if summaries.is_empty() {
            return RecentList::Empty;
        }
        RecentList::Entries(
            summaries
                .iter()
                .map(|summary| RecentEntry {
                    id: summary.id,
                    filename: summary.filename.clone(),
                    date: format_review_date(summary.created_at),
                    score: format_score(summary.overall_score),
                })
                .collect(),
        )
    }
}
