//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and classifies `HttpResponse` values
//! without touching the network; a `Transport` executes the actual GET.
//!
//! The upstream API is read-only, so every request is a GET with no body and
//! `HttpRequest` carries no method field.

use std::fmt;

/// Placeholder substituted for the `Authorization` value on every
/// diagnostic surface.
pub const REDACTED_AUTHORIZATION: &str = "SHAREDKEY [HIDDEN]";

/// A fully composed GET request.
///
/// Built by `RequestBuilder::build`. Headers keep insertion order so the
/// wire shape is deterministic.
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    /// Look up a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Headers with the `Authorization` value replaced by
    /// [`REDACTED_AUTHORIZATION`].
    pub fn redacted_headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .map(|(name, value)| {
                if name.eq_ignore_ascii_case("authorization") {
                    (name.clone(), REDACTED_AUTHORIZATION.to_string())
                } else {
                    (name.clone(), value.clone())
                }
            })
            .collect()
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &self.redacted_headers())
            .finish()
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then
/// passed to `classify`. The body is kept as text so it can be shown
/// verbatim when it does not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Redacted echo of a composed request, for logging or an operator's
/// "request details" pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDiagnostics {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl RequestDiagnostics {
    pub fn from_request(request: &HttpRequest) -> Self {
        Self {
            url: request.url.clone(),
            headers: request.redacted_headers(),
        }
    }
}

impl fmt::Display for RequestDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GET {}", self.url)?;
        for (name, value) in &self.headers {
            writeln!(f, "{name}: {value}")?;
        }
        Ok(())
    }
}

/// Status line and headers of a received response, for the debug log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDiagnostics {
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl ResponseDiagnostics {
    pub fn from_response(response: &HttpResponse) -> Self {
        Self {
            status: response.status,
            headers: response.headers.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            url: "https://api.example.test/DispensableDrugs/search?searchText=aspirin".to_string(),
            headers: vec![
                ("Authorization".to_string(), "SHAREDKEY 1234:s3cr3t".to_string()),
                ("Accept".to_string(), "application/json".to_string()),
            ],
        }
    }

    #[test]
    fn redacted_headers_hide_the_secret() {
        let headers = request().redacted_headers();
        assert_eq!(headers[0].1, REDACTED_AUTHORIZATION);
        assert_eq!(headers[1].1, "application/json");
        assert!(headers.iter().all(|(_, v)| !v.contains("s3cr3t")));
    }

    #[test]
    fn debug_output_never_contains_the_secret() {
        let debug = format!("{:?}", request());
        assert!(!debug.contains("s3cr3t"));
        assert!(debug.contains("[HIDDEN]"));
    }

    #[test]
    fn diagnostics_display_lists_url_and_headers() {
        let text = RequestDiagnostics::from_request(&request()).to_string();
        assert!(text.starts_with("GET https://api.example.test/DispensableDrugs/search"));
        assert!(text.contains("Authorization: SHAREDKEY [HIDDEN]"));
        assert!(!text.contains("s3cr3t"));
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let mut response = HttpResponse::new(200, "{}");
        response
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(request().header("accept"), Some("application/json"));
        assert!(request().header("cache-control").is_none());
    }
}
