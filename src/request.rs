use chrono::NaiveDate;
use reqwest::Method;
use url::form_urlencoded;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// A fully formed request, relative to the transport's base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    pub fn get(path: String) -> Self {
        Self {
            method: Method::GET,
            path,
            query: None,
            body: None,
        }
    }

    pub fn post(path: String, body: Vec<u8>) -> Self {
        Self {
            method: Method::POST,
            path,
            query: None,
            body: Some(body),
        }
    }

    /// Attach a query string; an empty one is dropped.
    pub fn with_query(mut self, query: String) -> Self {
        self.query = Some(query).filter(|q| !q.is_empty());
        self
    }
}

/// Join path segments with "/" and terminate with a trailing slash.
pub fn resource_path(segments: &[&str]) -> String {
    let mut path = segments.join("/");
    path.push('/');
    path
}

/// Query string holding only the parameters that were actually provided.
pub struct Query {
    inner: form_urlencoded::Serializer<'static, String>,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    pub fn new() -> Self {
        Self {
            inner: form_urlencoded::Serializer::new(String::new()),
        }
    }

    pub fn param(mut self, key: &str, value: &str) -> Self {
        self.inner.append_pair(key, value);
        self
    }

    pub fn opt_date(self, key: &str, value: Option<NaiveDate>) -> Self {
        match value {
            Some(date) => self.param(key, &date.format(DATE_FORMAT).to_string()),
            None => self,
        }
    }

    pub fn finish(mut self) -> String {
        self.inner.finish()
    }
}

/// `date_from` / `date_to` filter; either bound may be absent. Bounds are
/// sent as given, the server judges whether the range makes sense.
pub fn date_range_query(date_from: Option<NaiveDate>, date_to: Option<NaiveDate>) -> String {
    Query::new()
        .opt_date("date_from", date_from)
        .opt_date("date_to", date_to)
        .finish()
}

pub fn pagination_query(limit: u64, offset: u64) -> String {
    Query::new()
        .param("limit", &limit.to_string())
        .param("offset", &offset.to_string())
        .finish()
}

pub fn country_query(country: &str) -> String {
    Query::new().param("country", country).finish()
}
