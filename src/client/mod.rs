//! Shared HTTP client wrapper
//!
//! One [`ApiClient`] is built at startup and shared read-only by every store.
//! It knows the backend origin, sends JSON, and turns any non-2xx answer into
//! [`ClientError::Status`]. It does not retry, time out or otherwise interpret
//! status codes.

use crate::config::ApiConfig;
use crate::core::auth::{NoAuth, TokenProvider};
use crate::core::error::ClientError;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue, LOCATION};
use reqwest::{Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Per-call extras
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Additional headers, sent after the defaults
    pub headers: Vec<(String, String)>,
    /// Query string parameters
    pub query: Vec<(String, String)>,
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }
}

/// Successful (2xx) backend response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// `Location` header, sent by backends that answer a create without a body
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    /// Decode the body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Whether the backend sent no body (typically 204)
    pub fn is_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }
}

/// Configured backend client
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    auth: Arc<dyn TokenProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Build a client from configuration
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let client = Self::with_base_url(&config.base_url)?;
        if config.log_base_url {
            tracing::info!(base_url = %client.base_url, "API base URL");
        }
        Ok(client)
    }

    /// Build a client for `base_url` with default settings
    pub fn with_base_url(base_url: &str) -> Result<Self, ClientError> {
        Url::parse(base_url).map_err(|e| ClientError::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            auth: Arc::new(NoAuth),
        })
    }

    /// Attach bearer tokens from `provider` to every request
    pub fn with_token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.auth = Arc::new(provider);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a path relative to the base URL.
    ///
    /// Absolute `http(s)://` inputs are returned unchanged so hyperlinks
    /// handed out by the backend can be followed directly.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Resolve a reference such as a `Location` header against the URL
    /// `path` was sent to, the way a browser would
    pub fn resolve(&self, path: &str, reference: &str) -> Result<String, ClientError> {
        Url::parse(&self.url(path))
            .and_then(|request_url| request_url.join(reference))
            .map(String::from)
            .map_err(|e| ClientError::InvalidUrl {
                url: reference.to_string(),
                message: e.to_string(),
            })
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.request(Method::GET, path, None, RequestOptions::default())
            .await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse, ClientError> {
        self.request(Method::POST, path, Some(body), RequestOptions::default())
            .await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<ApiResponse, ClientError> {
        self.request(Method::PUT, path, Some(body), RequestOptions::default())
            .await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.request(Method::DELETE, path, None, RequestOptions::default())
            .await
    }

    /// Issue a request with any method, optional JSON body and per-call options
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.url(path);
        let transport = |source: reqwest::Error| ClientError::Transport {
            method: method.to_string(),
            path: path.to_string(),
            source,
        };

        let mut builder = self.http.request(method.clone(), &url);
        if let Some(token) = self.auth.access_token().await.map_err(ClientError::Auth)? {
            builder = builder.bearer_auth(token);
        }
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = Vec::from(response.bytes().await.map_err(transport)?);

        tracing::debug!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            "Backend call"
        );

        if !status.is_success() {
            return Err(ClientError::Status {
                method: method.to_string(),
                path: path.to_string(),
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}
