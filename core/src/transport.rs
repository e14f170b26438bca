//! The seam between request building and the network.
//!
//! The core never opens sockets itself. A `Transport` executes one GET and
//! returns either the response as data or a `TransportError`; 4xx and 5xx
//! responses are data, not errors.

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Result<HttpResponse, TransportError>,
{
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self(request)
    }
}

#[cfg(feature = "ureq-transport")]
pub use self::blocking::UreqTransport;

#[cfg(feature = "ureq-transport")]
mod blocking {
    use std::time::Duration;

    use super::Transport;
    use crate::config::{ClientConfig, DEFAULT_MAX_BODY_BYTES};
    use crate::error::TransportError;
    use crate::http::{HttpRequest, HttpResponse};

    /// Blocking transport on a ureq agent.
    ///
    /// Status codes are never turned into errors so the classifier sees
    /// every response. Bodies are read as bytes and decoded lossily, so a
    /// body that is not UTF-8 still arrives with its status.
    #[derive(Clone)]
    pub struct UreqTransport {
        agent: ureq::Agent,
        max_body_bytes: u64,
    }

    impl UreqTransport {
        pub fn new(timeout: Option<Duration>) -> Self {
            let agent = ureq::Agent::config_builder()
                .http_status_as_error(false)
                .timeout_global(timeout)
                .build()
                .new_agent();
            Self {
                agent,
                max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            }
        }

        pub fn from_config(config: &ClientConfig) -> Self {
            Self::new(config.timeout).with_max_body_bytes(config.max_body_bytes)
        }

        /// Largest body read before the request fails as a transport error.
        pub fn with_max_body_bytes(mut self, limit: u64) -> Self {
            self.max_body_bytes = limit;
            self
        }
    }

    impl Transport for UreqTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut builder = self.agent.get(request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            let mut response = builder.call()?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.as_str().to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let bytes = response
                .body_mut()
                .with_config()
                .limit(self.max_body_bytes)
                .read_to_vec()?;
            let body = match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(err) => {
                    log::debug!("response body is not UTF-8; decoding lossily");
                    String::from_utf8_lossy(err.as_bytes()).into_owned()
                }
            };

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_transports() {
        let transport = |request: &HttpRequest| -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse::new(200, request.url.clone()))
        };
        let request = HttpRequest {
            url: "http://localhost/x".to_string(),
            headers: Vec::new(),
        };
        let response = transport.execute(&request).unwrap();
        assert_eq!(response.body, "http://localhost/x");
    }
}
