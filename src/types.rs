//! Director end-to-end types
//!
//! Request, response envelope and error definitions shared by the client and
//! the test context.
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, InvalidHeaderValue};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;

/// Header identifying the tenant a request is executed for
pub const TENANT_HEADER: &str = "tenant";

/// GraphQL request: query text, variables and headers
#[derive(Clone, Debug, Default)]
pub struct Request {
    query: String,
    vars: Map<String, Value>,
    headers: HeaderMap,
}

impl Request {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            vars: Map::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Set a variable, replacing a previous value with the same name
    pub fn var(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.vars.insert(name.to_string(), value.into());
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn vars(&self) -> &Map<String, Value> {
        &self.vars
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Set the tenant header unless the request already carries one.
    ///
    /// Returns `true` when the header was added.
    pub fn ensure_tenant(&mut self, tenant: &str) -> Result<bool, QueryError> {
        if self.headers.contains_key(TENANT_HEADER) {
            return Ok(false);
        }
        let value = HeaderValue::from_str(tenant).map_err(QueryError::InvalidHeader)?;
        self.headers
            .insert(HeaderName::from_static(TENANT_HEADER), value);
        Ok(true)
    }
}

/// Response envelope for queries aliasing their payload as `result`
///
/// ```graphql
/// query { result: applications { data { id } } }
/// ```
#[derive(Debug, Deserialize)]
pub struct GenericGqlResponse<T> {
    pub result: T,
}

impl<T> GenericGqlResponse<T> {
    pub fn into_result(self) -> T {
        self.result
    }
}

pub enum QueryError {
    /// Connection, TLS or timeout failure
    Transport(reqwest::Error),
    /// Server answered with a non-success status
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// Server answered with GraphQL errors
    GraphQL(Vec<String>),
    /// Response body could not be decoded
    Decode(serde_json::Error),
    /// Response has no `data`
    MissingData,
    /// Header value can not be sent
    InvalidHeader(InvalidHeaderValue),
}

impl std::error::Error for QueryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QueryError::Transport(e) => Some(e),
            QueryError::Decode(e) => Some(e),
            QueryError::InvalidHeader(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QueryError::Transport(e) => write!(f, "graphql: request failed: {}", e),
            QueryError::Status { status, body } => write!(
                f,
                "graphql: server returned a non-success status code: {}, body={:?}",
                status, body
            ),
            QueryError::GraphQL(messages) => write!(f, "graphql: {}", messages.join("; ")),
            QueryError::Decode(e) => write!(f, "graphql: decoding response: {}", e),
            QueryError::MissingData => write!(f, "graphql: response contains no data"),
            QueryError::InvalidHeader(e) => write!(f, "graphql: invalid header value: {}", e),
        }
    }
}

impl fmt::Debug for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(e: reqwest::Error) -> Self {
        QueryError::Transport(e)
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(e: serde_json::Error) -> Self {
        QueryError::Decode(e)
    }
}
