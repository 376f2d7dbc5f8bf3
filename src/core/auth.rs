//! Authentication seam between the identity provider and the HTTP client
//!
//! The sign-in flow itself (browser redirect, token cache) belongs to the
//! external identity provider. barkeep only needs two things from it:
//! a bearer token for backend calls and the signed-in account for views.

use crate::core::error::ClientError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// Source of bearer tokens for backend requests
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Token to attach to the next request, `None` to send the request unauthenticated
    async fn access_token(&self) -> Result<Option<String>, String>;
}

/// Provider that never attaches a token
#[derive(Debug, Clone, Default)]
pub struct NoAuth;

#[async_trait]
impl TokenProvider for NoAuth {
    async fn access_token(&self) -> Result<Option<String>, String> {
        Ok(None)
    }
}

/// Provider holding a token acquired elsewhere
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn access_token(&self) -> Result<Option<String>, String> {
        Ok(Some(self.0.clone()))
    }
}

/// Account returned by the identity provider after sign-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub home_account_id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Signed-in state shared with the view layer
///
/// Cheap to clone; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    account: Arc<RwLock<Option<Account>>>,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, account: Account) -> Result<(), ClientError> {
        let mut guard = self.write()?;
        tracing::info!(username = %account.username, "Signed in");
        *guard = Some(account);
        Ok(())
    }

    pub fn sign_out(&self) -> Result<(), ClientError> {
        if let Some(account) = self.write()?.take() {
            tracing::info!(username = %account.username, "Signed out");
        }
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.account.read().map(|a| a.is_some()).unwrap_or(false)
    }

    pub fn account(&self) -> Option<Account> {
        self.account.read().ok().and_then(|a| a.clone())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Option<Account>>, ClientError> {
        self.account.write().map_err(|e| {
            tracing::warn!(error = %e, "Auth state lock poisoned");
            ClientError::Auth(format!("auth state lock poisoned: {}", e))
        })
    }
}
