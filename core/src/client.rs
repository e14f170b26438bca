//! The single entry point the interactive host calls.
//!
//! # Design
//! `FdbClient` pairs a `RequestBuilder` with a `Transport` and carries no
//! mutable state between calls. Credentials are passed per call and never
//! stored. One call issues one GET and blocks until the transport returns;
//! there is no retry, caching or paging.

use crate::action::ApiAction;
use crate::builder::RequestBuilder;
use crate::classify::classify;
use crate::config::ClientConfig;
use crate::credentials::Credentials;
use crate::error::ActionError;
use crate::http::HttpRequest;
use crate::outcome::Outcome;
use crate::params::QueryParams;
use crate::resource::ResourcePath;
use crate::transport::Transport;

#[derive(Clone)]
pub struct FdbClient<T> {
    builder: RequestBuilder,
    transport: T,
}

impl<T: Transport> FdbClient<T> {
    pub fn new(config: ClientConfig, transport: T) -> Self {
        Self {
            builder: RequestBuilder::new(config),
            transport,
        }
    }

    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Build, send and classify one request. Never fails: transport errors
    /// come back as `Outcome::Error`.
    pub fn submit_request(
        &self,
        path: &ResourcePath,
        params: &QueryParams,
        credentials: &Credentials,
    ) -> Outcome {
        let request = self.builder.build(path, params, credentials);
        self.send(&request)
    }

    /// Run an operator action. Fails only when the action is missing a
    /// required field, in which case nothing is sent.
    pub fn run(
        &self,
        action: &ApiAction,
        credentials: &Credentials,
    ) -> Result<Outcome, ActionError> {
        let (path, params) = action.to_request()?;
        Ok(self.submit_request(&path, &params, credentials))
    }

    fn send(&self, request: &HttpRequest) -> Outcome {
        let result = self.transport.execute(request);
        classify(&result)
    }
}

#[cfg(feature = "ureq-transport")]
impl FdbClient<crate::transport::UreqTransport> {
    /// Client on a ureq agent honoring the configured timeout.
    pub fn with_ureq(config: ClientConfig) -> Self {
        let transport = crate::transport::UreqTransport::from_config(&config);
        Self::new(config, transport)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::TransportError;
    use crate::http::HttpResponse;
    use crate::outcome::ErrorKind;
    use crate::resource::Collection;

    fn creds() -> Credentials {
        Credentials::new("1234", "s3cr3t").unwrap()
    }

    fn config() -> ClientConfig {
        ClientConfig::new("http://localhost:3000/CC/api/v1_4")
    }

    #[test]
    fn submit_request_classifies_transport_response() {
        let client = FdbClient::new(config(), |_: &HttpRequest| {
            Ok::<_, TransportError>(HttpResponse::new(200, r#"{"Items":[]}"#))
        });
        let outcome = client.submit_request(
            &ResourcePath::search(Collection::DispensableDrugs),
            &QueryParams::new().with("searchText", "aspirin"),
            &creds(),
        );
        assert!(outcome.is_success());
    }

    #[test]
    fn transport_sees_the_built_request() {
        let seen = RefCell::new(Vec::new());
        let client = FdbClient::new(config(), |req: &HttpRequest| {
            seen.borrow_mut().push(req.clone());
            Ok::<_, TransportError>(HttpResponse::new(404, ""))
        });
        let path = ResourcePath::parse("DispensableDrugs/9");
        let outcome = client.submit_request(&path, &QueryParams::new(), &creds());
        assert!(matches!(outcome, Outcome::NoResults { .. }));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0].url,
            "http://localhost:3000/CC/api/v1_4/DispensableDrugs/9?callSystemName=StreamlitTest"
        );
        assert_eq!(seen[0].header("Authorization"), Some("SHAREDKEY 1234:s3cr3t"));
    }

    #[test]
    fn transport_error_never_escapes() {
        let client = FdbClient::new(config(), |_: &HttpRequest| {
            Err::<HttpResponse, _>(TransportError::Connect("refused".to_string()))
        });
        let outcome =
            client.submit_request(&ResourcePath::parse("x"), &QueryParams::new(), &creds());
        assert!(matches!(
            outcome,
            Outcome::Error {
                kind: ErrorKind::TransportFailure,
                status_code: None,
                body: None,
                ..
            }
        ));
    }

    #[test]
    fn incomplete_action_sends_nothing() {
        let calls = RefCell::new(0);
        let client = FdbClient::new(config(), |_: &HttpRequest| {
            *calls.borrow_mut() += 1;
            Ok::<_, TransportError>(HttpResponse::new(200, "{}"))
        });
        let action = ApiAction::DrugDetails {
            collection: Collection::DispensableDrugs,
            id: " ".to_string(),
        };
        assert!(client.run(&action, &creds()).is_err());
        assert_eq!(*calls.borrow(), 0);
    }
}
