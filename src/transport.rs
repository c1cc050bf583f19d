use crate::error::NordigenError;
use crate::request::ApiRequest;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client as HttpClient, StatusCode};
use std::fmt;
use std::time::Duration;
use url::Url;

pub const BASE_URL: &str = "https://bankaccountdata.gocardless.com/api/v2/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const JSON: &str = "application/json";

/// Executes a prepared request. Implementations own authentication;
/// the client never touches credentials.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<TransportResponse, NordigenError>;
}

/// Readable body of a received response.
#[async_trait]
pub trait ResponseBody: Send {
    /// Drain the body completely into memory.
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, NordigenError>;
}

#[async_trait]
impl ResponseBody for reqwest::Response {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, NordigenError> {
        (*self)
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| NordigenError::Io(std::io::Error::other(e)))
    }
}

#[async_trait]
impl ResponseBody for Vec<u8> {
    async fn read_all(self: Box<Self>) -> Result<Vec<u8>, NordigenError> {
        Ok(*self)
    }
}

pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Box<dyn ResponseBody>,
}

impl TransportResponse {
    pub fn new(status: StatusCode, body: impl ResponseBody + 'static) -> Self {
        Self {
            status,
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Default transport: reqwest with a bearer access token.
#[derive(Clone)]
pub struct HttpTransport {
    access_token: String,
    http: HttpClient,
    base_url: Url,
}

impl HttpTransport {
    /// Create a transport against the default base URL.
    pub fn new(access_token: impl Into<String>) -> Result<Self, NordigenError> {
        let access_token = access_token.into();
        if access_token.trim().is_empty() {
            return Err(NordigenError::MissingAccessToken);
        }

        info!("Initialized Nordigen HTTP transport with default base URL");
        Ok(Self {
            access_token,
            http: build_http(DEFAULT_TIMEOUT)?,
            base_url: Url::parse(BASE_URL)?,
        })
    }

    /// Override the base URL (useful for sandboxes, proxies or tests).
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, NordigenError> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        info!("Updated Nordigen API base URL to {}", base_url);
        self.base_url = base_url;
        Ok(self)
    }

    /// Replace the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, NordigenError> {
        self.http = build_http(timeout)?;
        debug!("Set request timeout to {:?}", timeout);
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url_for(&self, request: &ApiRequest) -> Result<Url, NordigenError> {
        let mut url = self
            .base_url
            .join(request.path.trim_start_matches('/'))
            .map_err(|e| NordigenError::Transport(Box::new(e)))?;
        url.set_query(request.query.as_deref());
        Ok(url)
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("access_token", &"<token>")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<TransportResponse, NordigenError> {
        let url = self.url_for(&request)?;
        debug!("{} request to {}", request.method, url);

        let mut builder = self
            .http
            .request(request.method, url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, JSON);
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, JSON).body(body);
        }

        let response = builder.send().await?;
        debug!("Received status {}", response.status());
        Ok(TransportResponse {
            status: response.status(),
            body: Box::new(response),
        })
    }
}

fn build_http(timeout: Duration) -> Result<HttpClient, NordigenError> {
    Ok(HttpClient::builder().timeout(timeout).build()?)
}
