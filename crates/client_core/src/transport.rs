use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client, Method, StatusCode,
};
use serde::Serialize;
use serde_json::Value;
use shared::protocol::DEFAULT_API_BASE;
use thiserror::Error;
use tracing::{debug, error};
use url::Url;

/// Failure of a single round trip to the storefront API.
///
/// Status failures, connection faults and undecodable bodies all surface as
/// this one type; only the message differs.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    cause: Option<TransportFault>,
}

#[derive(Debug, Error)]
enum TransportFault {
    #[error(transparent)]
    Network(#[from] reqwest::Error),
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    pub fn status(status: StatusCode) -> Self {
        Self {
            message: format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            ),
            cause: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    fn fault(fault: TransportFault) -> Self {
        Self {
            message: fault.to_string(),
            cause: Some(fault),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(value: reqwest::Error) -> Self {
        Self::fault(TransportFault::Network(value))
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(value: serde_json::Error) -> Self {
        Self::fault(TransportFault::Decode(value))
    }
}

/// Per-call overrides: method, extra headers and a pre-serialized JSON body.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::with_method(Method::GET)
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn put() -> Self {
        Self::with_method(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Serializes `body` in field order; the bytes are sent as-is.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, TransportError> {
        self.body = Some(serde_json::to_vec(body)?);
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub origin: Url,
    pub api_base: String,
}

impl TransportConfig {
    pub fn new(origin: Url) -> Self {
        Self {
            origin,
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiTransport {
    http: Client,
    config: TransportConfig,
}

impl ApiTransport {
    pub fn new(config: TransportConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(http: Client, config: TransportConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn endpoint(&self, path_suffix: &str) -> String {
        format!(
            "{}{}{}",
            self.config.origin.as_str().trim_end_matches('/'),
            self.config.api_base,
            path_suffix
        )
    }

    /// Issues exactly one request. Failures are logged before they are
    /// returned.
    pub async fn call(
        &self,
        path_suffix: &str,
        options: RequestOptions,
    ) -> Result<Value, TransportError> {
        let result = self.execute(path_suffix, options).await;
        if let Err(err) = &result {
            error!(path = path_suffix, error = %err, "api call failed");
        }
        result
    }

    async fn execute(
        &self,
        path_suffix: &str,
        options: RequestOptions,
    ) -> Result<Value, TransportError> {
        let RequestOptions {
            method,
            headers: overrides,
            body,
        } = options;
        let url = self.endpoint(path_suffix);
        debug!(method = %method, url = %url, "issuing api call");

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(overrides);

        let mut request = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::status(status));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
