//! Request/response normalization layer for the drug-information API.
//!
//! # Overview
//! Builds authenticated GET requests, classifies what comes back into a
//! small `Outcome` taxonomy and extracts inspectable structure from the
//! payload (host-does-IO pattern). The network round-trip sits behind the
//! `Transport` trait, so everything else is deterministic and testable.
//!
//! # Design
//! - `RequestBuilder` is a pure function of path, params and credentials.
//! - `classify` is total and never fails; transport failures become
//!   `Outcome::Error`.
//! - `describe_outcome` flattens an outcome into renderer-ready fields.
//! - No state outlives one request/response cycle. Credentials are passed
//!   per call and redacted on every diagnostic surface.

pub mod action;
pub mod analysis;
pub mod builder;
pub mod classify;
pub mod client;
pub mod config;
pub mod credentials;
pub mod describe;
pub mod error;
pub mod http;
pub mod outcome;
pub mod params;
pub mod resource;
pub mod transport;

pub use action::{ApiAction, ClassificationType, InteroperableType, SearchType, Window};
pub use analysis::{analyze, highlights, Analysis, Highlights};
pub use builder::RequestBuilder;
pub use classify::{classify, TransportResult};
pub use client::FdbClient;
pub use config::ClientConfig;
pub use credentials::Credentials;
pub use describe::{describe_outcome, OutcomeView};
pub use error::{ActionError, ConfigError, CredentialsError, TransportError};
pub use http::{HttpRequest, HttpResponse, RequestDiagnostics, ResponseDiagnostics};
pub use outcome::{ErrorKind, Outcome};
pub use params::QueryParams;
pub use resource::{Collection, ResourcePath, Subresource};
pub use transport::Transport;
#[cfg(feature = "ureq-transport")]
pub use transport::UreqTransport;
