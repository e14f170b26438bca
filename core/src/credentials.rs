//! Shared-key credentials supplied by the operator.

use std::fmt;

use crate::error::CredentialsError;

/// Authorization scheme prefix used by the upstream API.
pub const AUTH_SCHEME: &str = "SHAREDKEY";

/// A (client id, client secret) pair.
///
/// Both halves are guaranteed non-blank, so holding a `Credentials` value is
/// the gate for building a request. The secret is never printed: `Debug`
/// redacts it and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, CredentialsError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        if client_id.trim().is_empty() {
            return Err(CredentialsError::MissingClientId);
        }
        if client_secret.trim().is_empty() {
            return Err(CredentialsError::MissingClientSecret);
        }
        Ok(Self {
            client_id,
            client_secret,
        })
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// `SHAREDKEY {id}:{secret}`, the only place the secret is rendered.
    pub fn authorization_value(&self) -> String {
        format!("{AUTH_SCHEME} {}:{}", self.client_id, self.client_secret)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[HIDDEN]")
            .finish()
    }
}
