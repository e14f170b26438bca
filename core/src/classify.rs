//! Response classification.
//!
//! `classify` is total: every transport result maps to exactly one
//! `Outcome`, checked in this order:
//!
//! 1. transport failure → `Error` (`TransportFailure`, no status, no body)
//! 2. 404 → `NoResults`
//! 3. 401 → `AuthFailure`
//! 4. 2xx → `Success`, payload `None` if the body is empty or not JSON
//! 5. anything else → `Error` (`ServerOrClientError`, status, raw body)

use serde_json::Value;

use crate::error::TransportError;
use crate::http::{HttpResponse, ResponseDiagnostics};
use crate::outcome::{ErrorKind, Outcome, AUTH_FAILURE_MESSAGE, NO_RESULTS_MESSAGE};

/// What the transport hands back for one request.
pub type TransportResult = Result<HttpResponse, TransportError>;

pub fn classify(result: &TransportResult) -> Outcome {
    let response = match result {
        Ok(response) => response,
        Err(err) => {
            log::warn!("no response received: {err}");
            return Outcome::Error {
                kind: ErrorKind::TransportFailure,
                message: err.to_string(),
                status_code: None,
                body: None,
            };
        }
    };

    log::debug!("{:?}", ResponseDiagnostics::from_response(response));

    match response.status {
        404 => {
            log::info!("upstream returned 404, reporting no results");
            Outcome::NoResults {
                message: NO_RESULTS_MESSAGE.to_string(),
            }
        }
        401 => {
            log::info!("upstream rejected credentials");
            Outcome::AuthFailure {
                message: AUTH_FAILURE_MESSAGE.to_string(),
            }
        }
        200..=299 => Outcome::Success {
            status_code: response.status,
            payload: decode_payload(&response.body),
        },
        status => {
            log::info!("upstream returned {status}");
            Outcome::Error {
                kind: ErrorKind::ServerOrClientError,
                message: status_message(status),
                status_code: Some(status),
                body: Some(response.body.clone()),
            }
        }
    }
}

/// Decode a success body. An empty or undecodable body is not an error:
/// the HTTP contract was honored, there is just nothing to show.
fn decode_payload(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("success body is not JSON: {e}");
            None
        }
    }
}

fn status_message(status: u16) -> String {
    let class = match status {
        400..=499 => "client error",
        500..=599 => "server error",
        _ => "unexpected status",
    };
    format!("HTTP {status} {class}")
}
