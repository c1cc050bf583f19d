use reqwest::StatusCode;
use std::borrow::Cow;
use std::error::Error as StdError;
use thiserror::Error;

/// Boxed lower-level error carried by custom transports and [`ApiError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum NordigenError {
    /// Raised only while building an [`HttpTransport`](crate::HttpTransport).
    #[error("access token must not be empty")]
    MissingAccessToken,

    /// Raised only while building an [`HttpTransport`](crate::HttpTransport).
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("api rejected request: {0}")]
    Api(#[from] ApiError),
}

impl NordigenError {
    /// Status code of the rejected response, if this is an API error.
    pub fn api_status(&self) -> Option<StatusCode> {
        match self {
            NordigenError::Api(err) => Some(err.status),
            _ => None,
        }
    }

    /// True for failures that happened before any response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, NordigenError::Http(_) | NordigenError::Transport(_))
    }
}

/// A response was received but its status did not match the one the
/// operation expects. The body is kept byte for byte, never parsed.
#[derive(Debug, Error)]
#[error("unexpected status {status}: {}", String::from_utf8_lossy(.body))]
pub struct ApiError {
    pub status: StatusCode,
    pub body: Vec<u8>,
    #[source]
    pub source: Option<BoxError>,
}

impl ApiError {
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Body as text; invalid UTF-8 sequences are replaced.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    pub fn is_client_error(&self) -> bool {
        self.status.is_client_error()
    }

    pub fn is_server_error(&self) -> bool {
        self.status.is_server_error()
    }
}
