//! HTTP transport for the JIRA client.
//!
//! The client builds complete requests and hands them to a [`Transport`].
//! [`HttpTransport`] sends them with a blocking `reqwest` client; tests swap
//! in their own implementation.

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use reqwest::{blocking::Client, Method, StatusCode};
use thiserror::Error;

/// A fully built HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(HeaderName, HeaderValue)>,
    pub body: Option<Vec<u8>>,
    /// Upper bound for the whole exchange.
    pub timeout: Duration,
}

/// Status and body of an HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Sends one request and waits for its response.
pub trait Transport {
    /// Send `request`, returning whatever status the server answered with.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when no response was received.
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request)
    }
}

/// Broad cause of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The request exceeded its timeout.
    Timeout,
    /// The server could not be reached (DNS, refused, TLS).
    Connect,
    /// Anything else, such as a body read failure.
    Other,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TransportErrorKind::Timeout => "request timed out",
            TransportErrorKind::Connect => "connection failed",
            TransportErrorKind::Other => "request failed",
        };
        f.write_str(text)
    }
}

/// A network-level failure, wrapping the underlying cause.
#[derive(Debug, Error)]
#[error("{kind}: {source}")]
pub struct TransportError {
    kind: TransportErrorKind,
    #[source]
    source: Box<dyn StdError + Send + Sync>,
}

impl TransportError {
    /// Wrap a cause.
    pub fn new(kind: TransportErrorKind, source: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }

    /// The broad cause of the failure.
    pub fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    /// Check whether the request timed out.
    pub fn is_timeout(&self) -> bool {
        self.kind == TransportErrorKind::Timeout
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else {
            TransportErrorKind::Other
        };
        Self::new(kind, err)
    }
}

/// [`Transport`] backed by a blocking `reqwest` client.
///
/// The client keeps a connection pool, so one instance should be reused for
/// every request in a process.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Build a transport whose client enforces `timeout` on every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("goji/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .timeout(request.timeout);

        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;

        Ok(HttpResponse { status, body })
    }
}
