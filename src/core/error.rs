//! Typed error handling for barkeep
//!
//! Every store operation returns a [`StoreError`] instead of swallowing the
//! failure, so the view layer decides what the user gets to see.
//!
//! # Error Categories
//!
//! - [`ClientError`]: Errors raised by the HTTP client wrapper
//! - [`StoreError`]: Errors raised by entity store operations
//! - [`ConfigError`]: Errors related to configuration loading and validation
//!
//! # Example
//!
//! ```rust,ignore
//! use barkeep::prelude::*;
//!
//! match stores.drinks.create(drink).await {
//!     Ok(created) => println!("Created drink {:?}", created.id),
//!     Err(err) if err.is_transport() => eprintln!("Backend unreachable: {}", err),
//!     Err(err) => eprintln!("Backend rejected the drink: {}", err),
//! }
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised by [`ApiClient`](crate::client::ApiClient)
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS, TLS...)
    #[error("transport error on {method} {path}: {source}")]
    Transport {
        method: String,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status
    #[error("{method} {path} returned {status}")]
    Status {
        method: String,
        path: String,
        status: StatusCode,
        body: String,
    },

    /// The response body could not be decoded
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The base URL or request path could not be turned into a URL
    #[error("invalid url '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The token provider could not supply a token
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The underlying HTTP client could not be constructed
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// HTTP status of the response, if the backend answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure happened before any response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }
}

/// Errors raised by [`EntityStore`](crate::storage::EntityStore) operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// Update or delete was called with a record the backend never assigned an id to
    #[error("{entity_type} has no identifier")]
    MissingId { entity_type: String },

    /// The hyperlinked envelope did not contain the expected collection
    #[error("response envelope has no embedded '{key}' collection")]
    EnvelopeKeyMissing { key: String },

    /// The request payload could not be built
    #[error("failed to serialize {entity_type}: {source}")]
    Serialize {
        entity_type: String,
        #[source]
        source: serde_json::Error,
    },

    /// Another task panicked while holding the list lock
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    /// HTTP status of the failed backend call, if there was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            StoreError::Client(e) => e.status(),
            _ => None,
        }
    }

    /// Whether the backend was unreachable
    pub fn is_transport(&self) -> bool {
        matches!(self, StoreError::Client(e) if e.is_transport())
    }

    /// Stable error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Client(ClientError::Transport { .. }) => "TRANSPORT_ERROR",
            StoreError::Client(ClientError::Status { .. }) => "BACKEND_REJECTED",
            StoreError::Client(ClientError::Decode(_)) => "DECODE_ERROR",
            StoreError::Client(ClientError::InvalidUrl { .. }) => "INVALID_URL",
            StoreError::Client(ClientError::Auth(_)) => "AUTH_ERROR",
            StoreError::Client(ClientError::Build(_)) => "CLIENT_BUILD_ERROR",
            StoreError::MissingId { .. } => "MISSING_ID",
            StoreError::EnvelopeKeyMissing { .. } => "ENVELOPE_KEY_MISSING",
            StoreError::Serialize { .. } => "SERIALIZATION_ERROR",
            StoreError::LockPoisoned(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Client(ClientError::Decode(err))
    }
}

/// Errors related to configuration loading and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("environment variable {name} is not set")]
    MissingVariable { name: String },

    /// The configuration file could not be read
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid YAML for the expected shape
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The configuration parsed but holds invalid values
    #[error("invalid config: {0}")]
    Invalid(#[from] validator::ValidationErrors),
}
