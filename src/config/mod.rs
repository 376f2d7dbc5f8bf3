//! Configuration loading and management
//!
//! The backend origin is the only value the client strictly needs. It is read
//! once at startup, from the environment or from a YAML file:
//!
//! ```yaml
//! api:
//!   base_url: "http://localhost:8080"
//!   log_base_url: true
//! identity:
//!   client_id: "909acdce-0000-0000-0000-000000000000"
//!   authority: "https://login.microsoftonline.com/common"
//!   redirect_uri: "http://localhost:5173"
//! ```

use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Environment variable holding the backend origin
pub const BASE_URL_VAR: &str = "BARKEEP_API_BASE_URL";

/// Accepted fallback name for [`BASE_URL_VAR`]
pub const BASE_URL_FALLBACK_VAR: &str = "API_BASE_URL";

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    /// Target backend origin, e.g. `http://localhost:8080/api`
    #[validate(url)]
    pub base_url: String,

    /// Log the base URL when the client is built
    #[serde(default)]
    pub log_base_url: bool,
}

/// Where the identity provider keeps its token cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CacheLocation {
    #[default]
    SessionStorage,
    LocalStorage,
}

fn default_scopes() -> Vec<String> {
    ["user.read", "openid", "profile"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Sign-in settings handed to the external identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IdentityConfig {
    #[validate(length(min = 1))]
    pub client_id: String,

    #[validate(url)]
    pub authority: String,

    #[validate(url)]
    pub redirect_uri: String,

    #[serde(default)]
    #[validate(url)]
    pub post_logout_redirect_uri: Option<String>,

    #[serde(default)]
    pub cache_location: CacheLocation,

    #[serde(default)]
    pub store_auth_state_in_cookie: bool,

    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

impl IdentityConfig {
    /// Scopes requested on sign-in
    pub fn login_request(&self) -> &[String] {
        &self.scopes
    }
}

/// Complete client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClientConfig {
    #[validate(nested)]
    pub api: ApiConfig,

    #[serde(default)]
    #[validate(nested)]
    pub identity: Option<IdentityConfig>,
}

impl ClientConfig {
    /// Configuration pointing at `base_url` with everything else defaulted
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                log_base_url: false,
            },
            identity: None,
        }
    }

    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = base_url_from_env().ok_or_else(|| ConfigError::MissingVariable {
            name: BASE_URL_VAR.to_string(),
        })?;
        let config = Self::new(base_url);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file at `path`, letting the environment override the base URL
    pub fn from_env_or_file(path: &str) -> Result<Self, ConfigError> {
        let mut config: Self = match std::fs::read_to_string(path) {
            Ok(content) => serde_yaml::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Self::from_env();
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_string(),
                    source,
                });
            }
        };
        if let Some(base_url) = base_url_from_env() {
            config.api.base_url = base_url;
        }
        config.validate()?;
        Ok(config)
    }
}

fn base_url_from_env() -> Option<String> {
    [BASE_URL_VAR, BASE_URL_FALLBACK_VAR]
        .into_iter()
        .find_map(|name| std::env::var(name).ok().filter(|value| !value.trim().is_empty()))
}
