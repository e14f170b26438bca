//! Stateless request builder.
//!
//! # Design
//! `RequestBuilder` holds only configuration. `build` is a pure function of
//! its inputs: it fills in `callSystemName` when absent, encodes the query
//! and attaches the shared-key headers. Diagnostics are derived separately
//! from the finished request and never carry the secret.

use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::http::{HttpRequest, RequestDiagnostics};
use crate::params::{QueryParams, CALL_SYSTEM_NAME};
use crate::resource::ResourcePath;

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    config: ClientConfig,
}

impl RequestBuilder {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Compose `{base}/{path}?{query}` and the request headers.
    ///
    /// A caller-supplied `callSystemName` always wins over the configured
    /// default. Malformed inputs produce a malformed but well-defined URL;
    /// validation belongs to the caller.
    pub fn build(
        &self,
        path: &ResourcePath,
        params: &QueryParams,
        credentials: &Credentials,
    ) -> HttpRequest {
        let mut params = params.clone();
        params.insert_default(CALL_SYSTEM_NAME, &self.config.call_system_name);

        let url = format!(
            "{}/{}?{}",
            self.config.base_url.trim_end_matches('/'),
            path,
            params.encode()
        );

        let mut headers = vec![
            ("Authorization".to_string(), credentials.authorization_value()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if self.config.compat_headers {
            headers.push((
                "Content-Type".to_string(),
                "application/x-www-form-urlencoded".to_string(),
            ));
            headers.push(("Cache-Control".to_string(), "no-cache".to_string()));
        }

        let request = HttpRequest { url, headers };
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("{}", RequestDiagnostics::from_request(&request));
        }
        request
    }
}
