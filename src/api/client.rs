//! JIRA API client implementation.
//!
//! Every call follows the same steps: check the credentials, build the
//! request, send it once through the transport, and decode the response.
//! There are no retries; each request is bounded by [`REQUEST_TIMEOUT`].

use std::time::Duration;

use reqwest::header::{self, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, RemoteDetail, Result};
use super::request::{build_create_request, IssueDraft};
use super::transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
use super::types::{CreatedIssue, CurrentUser, Issue};
use crate::config::Credentials;

/// Timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Path of the REST API below the server URL.
const API_PATH: &str = "rest/api/3";

const APPLICATION_JSON: &str = "application/json";

/// The JIRA API client.
///
/// Holds no credentials; callers pass [`Credentials`] into each call.
#[derive(Debug, Clone)]
pub struct JiraClient<T = HttpTransport> {
    transport: T,
}

impl JiraClient<HttpTransport> {
    /// Create a client that talks HTTP(S) through `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(REQUEST_TIMEOUT)?))
    }
}

impl<T: Transport> JiraClient<T> {
    /// Create a client over an explicit transport.
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// Create an issue.
    ///
    /// Calls `POST /rest/api/3/issue` and expects `201 Created`.
    ///
    /// # Errors
    ///
    /// - `ApiError::MissingCredential` if a credentials field is empty; nothing is sent
    /// - `ApiError::Validation` if the draft lacks a required field; nothing is sent
    /// - `ApiError::Transport` if no response was received
    /// - `ApiError::Remote` for any status other than 201
    #[instrument(skip(self, credentials, draft), fields(project = %draft.project_key))]
    pub fn create_issue(&self, credentials: &Credentials, draft: &IssueDraft) -> Result<CreatedIssue> {
        let auth = Auth::from_credentials(credentials)?;
        let payload = build_create_request(draft)?;
        let body = serde_json::to_vec(&payload).map_err(ApiError::Encode)?;

        let mut request = self.request(Method::POST, api_url(credentials, "issue"), &auth);
        request.headers.push((
            header::CONTENT_TYPE,
            HeaderValue::from_static(APPLICATION_JSON),
        ));
        request.body = Some(body);

        let created: CreatedIssue = decode(self.dispatch(request)?, StatusCode::CREATED)?;
        debug!(key = %created.key, "Issue created");
        Ok(created)
    }

    /// Get a single issue by key.
    ///
    /// Calls `GET /rest/api/3/issue/{key}` and expects `200 OK`.
    #[instrument(skip(self, credentials), fields(issue_key = %key))]
    pub fn get_issue(&self, credentials: &Credentials, key: &str) -> Result<Issue> {
        let auth = Auth::from_credentials(credentials)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ApiError::EmptyIssueKey);
        }

        let path = format!("issue/{}", urlencoding::encode(key));
        let request = self.request(Method::GET, api_url(credentials, &path), &auth);
        decode(self.dispatch(request)?, StatusCode::OK)
    }

    /// Get the user the credentials belong to.
    ///
    /// Calls `GET /rest/api/3/myself`; useful for checking credentials.
    #[instrument(skip(self, credentials))]
    pub fn current_user(&self, credentials: &Credentials) -> Result<CurrentUser> {
        let auth = Auth::from_credentials(credentials)?;
        let request = self.request(Method::GET, api_url(credentials, "myself"), &auth);
        decode(self.dispatch(request)?, StatusCode::OK)
    }

    /// Start a request with the headers every call carries.
    fn request(&self, method: Method, url: String, auth: &Auth) -> HttpRequest {
        HttpRequest {
            method,
            url,
            headers: vec![
                (header::AUTHORIZATION, auth.header_value().clone()),
                (header::ACCEPT, HeaderValue::from_static(APPLICATION_JSON)),
            ],
            body: None,
            timeout: REQUEST_TIMEOUT,
        }
    }

    fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
        debug!(method = %request.method, url = %request.url, "Sending request");
        let response = self.transport.send(request)?;
        debug!(status = %response.status, "Received response");
        Ok(response)
    }
}

/// Decode `response` if it has the expected status, otherwise turn it into
/// a remote error.
fn decode<D: DeserializeOwned>(response: HttpResponse, expected: StatusCode) -> Result<D> {
    if response.status != expected {
        return Err(ApiError::Remote {
            status: response.status,
            detail: RemoteDetail::from_body(&response.body),
        });
    }

    serde_json::from_str(&response.body)
        .map_err(|e| ApiError::InvalidResponse(format!("failed to parse response: {}", e)))
}

/// Build `{server}/rest/api/3/{path}`.
fn api_url(credentials: &Credentials, path: &str) -> String {
    format!(
        "{}/{}/{}",
        normalize_base_url(&credentials.server_url),
        API_PATH,
        path
    )
}

/// Trim whitespace and trailing slashes from the server URL.
fn normalize_base_url(url: &str) -> &str {
    let url = url.trim().trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!(url = %url, "Server URL does not use HTTPS");
    }

    url
}
