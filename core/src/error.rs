//! Error types for the request/response normalization layer.
//!
//! # Design
//! None of these escape `FdbClient::submit_request`: a `TransportError` is
//! turned into an `Outcome::Error` by the classifier. The remaining errors
//! are raised before any request exists (bad credentials, bad config, an
//! action with a blank required field) so the host can prompt the operator
//! instead of sending a request.

use thiserror::Error;

/// Rejected credential pair. Neither variant carries the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialsError {
    #[error("client id is empty")]
    MissingClientId,

    #[error("client secret is empty")]
    MissingClientSecret,
}

/// No response reached the core: DNS, connect, timeout or a body that could
/// not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("transport error: {0}")]
    Other(String),
}

#[cfg(feature = "ureq-transport")]
impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        match &err {
            ureq::Error::Timeout(_) => TransportError::Timeout(err.to_string()),
            ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
                TransportError::Connect(err.to_string())
            }
            ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => {
                TransportError::Timeout(err.to_string())
            }
            ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::ConnectionRefused => {
                TransportError::Connect(err.to_string())
            }
            _ => TransportError::Other(err.to_string()),
        }
    }
}

/// Invalid configuration value, named by its environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must not be empty")]
    Empty { var: &'static str },

    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// An operator action is missing a field it cannot be sent without.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{0} must not be empty")]
    MissingField(&'static str),

    #[error("{0} must not contain '/'")]
    SlashInField(&'static str),
}
