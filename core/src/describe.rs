//! Flattening an `Outcome` into renderer-ready fields.
//!
//! The host decides how to show each field (tabs, a JSON viewer, a code
//! block). This module decides what goes in them.

use serde::Serialize;
use serde_json::Value;

use crate::analysis::{analyze, highlights, Analysis, Highlights};
use crate::outcome::Outcome;

pub const NO_RESULTS_HINTS: [&str; 3] = [
    "Checking the spelling",
    "Using a different search term",
    "Trying a more common drug name",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeView {
    pub summary_text: String,
    /// Tree view content: the success payload, or an error body that
    /// happens to be JSON.
    pub structured_payload: Option<Value>,
    /// Code-block content: pretty-printed payload or the raw error body.
    pub raw_text: Option<String>,
    pub analysis: Option<Analysis>,
    pub highlights: Option<Highlights>,
    /// Follow-up suggestions shown as a bullet list.
    pub hints: Vec<String>,
}

impl OutcomeView {
    fn summary(summary_text: String) -> Self {
        Self {
            summary_text,
            structured_payload: None,
            raw_text: None,
            analysis: None,
            highlights: None,
            hints: Vec::new(),
        }
    }
}

pub fn describe_outcome(outcome: &Outcome) -> OutcomeView {
    match outcome {
        Outcome::Success {
            status_code,
            payload,
        } => {
            let mut view =
                OutcomeView::summary(format!("Request successful! Status code: {status_code}"));
            let displayable = payload
                .as_ref()
                .filter(|value| value.is_object() || value.is_array());
            if let Some(value) = displayable {
                view.structured_payload = Some(value.clone());
                view.raw_text = serde_json::to_string_pretty(value).ok();
                view.highlights = highlights(Some(value));
            }
            view.analysis = Some(analyze(displayable));
            view
        }
        Outcome::NoResults { .. } => {
            let mut view = OutcomeView::summary("No results found. Try:".to_string());
            view.hints = NO_RESULTS_HINTS.iter().map(|h| h.to_string()).collect();
            view
        }
        Outcome::AuthFailure { message } => OutcomeView::summary(format!("Error: {message}")),
        Outcome::Error { message, body, .. } => {
            let mut view = OutcomeView::summary(format!("Error: {message}"));
            if let Some(body) = body.as_deref().filter(|b| !b.trim().is_empty()) {
                view.structured_payload = serde_json::from_str(body).ok();
                view.raw_text = Some(body.to_string());
            }
            view
        }
    }
}
