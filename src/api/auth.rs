//! Authentication handling for the JIRA API.
//!
//! JIRA Cloud uses Basic Auth with the account email and an API token.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::HeaderValue;

use super::error::{ApiError, Result};
use crate::config::{ApiToken, Credentials};

/// A ready-to-send `Authorization` header.
///
/// The raw token is encoded immediately and not kept.
#[derive(Clone)]
pub struct Auth {
    identity: String,
    header: HeaderValue,
}

impl Auth {
    /// Build the header from an identity and token.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidHeader` if the encoded value is not a valid
    /// header.
    pub fn new(identity: &str, token: &ApiToken) -> Result<Self> {
        let mut header = HeaderValue::from_str(&build_auth_header(identity, token.expose()))?;
        header.set_sensitive(true);

        Ok(Self {
            identity: identity.to_string(),
            header,
        })
    }

    /// Build the header from stored credentials.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingCredential` if the server URL, identity or
    /// token is empty.
    pub fn from_credentials(credentials: &Credentials) -> Result<Self> {
        if let Some(field) = credentials.missing_field() {
            return Err(ApiError::MissingCredential(field));
        }
        Self::new(&credentials.identity, &credentials.api_token)
    }

    /// The `Authorization` header value, marked sensitive.
    pub fn header_value(&self) -> &HeaderValue {
        &self.header
    }

    /// The identity the header was built for.
    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("identity", &self.identity)
            .field("header", &"Basic ********")
            .finish()
    }
}

/// Encode "identity:token" in Base64 and prepend "Basic ".
fn build_auth_header(identity: &str, token: &str) -> String {
    let credentials = format!("{}:{}", identity, token);
    format!("Basic {}", BASE64.encode(credentials.as_bytes()))
}
