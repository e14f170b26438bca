//! The result taxonomy handed to the renderer.
//!
//! # Design
//! `NoResults` and `AuthFailure` get dedicated variants because they are the
//! two outcomes an operator triggers by mistake (a misspelled search term,
//! stale credentials). Every other failure lands in `Error` with the status
//! and raw body for diagnosis.

use serde::Serialize;
use serde_json::Value;

pub const NO_RESULTS_MESSAGE: &str = "No results found for the search term.";
pub const AUTH_FAILURE_MESSAGE: &str = "Authentication failed. Please check your credentials.";

/// Why an `Outcome::Error` happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No response reached the client.
    TransportFailure,
    /// A non-2xx status other than 401 and 404.
    ServerOrClientError,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// 2xx. `payload` is `None` when the body was empty or not JSON.
    Success {
        status_code: u16,
        payload: Option<Value>,
    },
    /// 404.
    NoResults { message: String },
    /// 401.
    AuthFailure { message: String },
    Error {
        kind: ErrorKind,
        message: String,
        status_code: Option<u16>,
        body: Option<String>,
    },
}

impl Outcome {
    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::Success { .. } => "success",
            Outcome::NoResults { .. } => "no_results",
            Outcome::AuthFailure { .. } => "auth_failure",
            Outcome::Error { .. } => "error",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Outcome::Success { status_code, .. } => Some(*status_code),
            Outcome::NoResults { .. } => Some(404),
            Outcome::AuthFailure { .. } => Some(401),
            Outcome::Error { status_code, .. } => *status_code,
        }
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Outcome::Success { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_status_tag() {
        let outcome = Outcome::NoResults {
            message: NO_RESULTS_MESSAGE.to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "no_results");
        assert_eq!(json["message"], NO_RESULTS_MESSAGE);
    }

    #[test]
    fn error_kind_serializes_snake_case() {
        let outcome = Outcome::Error {
            kind: ErrorKind::TransportFailure,
            message: "timed out".to_string(),
            status_code: None,
            body: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["kind"], "transport_failure");
        assert!(json["status_code"].is_null());
        assert_eq!(outcome.tag(), "error");
        assert_eq!(outcome.status_code(), None);
    }

    #[test]
    fn implied_status_codes() {
        let auth = Outcome::AuthFailure {
            message: AUTH_FAILURE_MESSAGE.to_string(),
        };
        assert_eq!(auth.status_code(), Some(401));
        assert!(auth.payload().is_none());
        assert!(!auth.is_success());
    }
}
