//! Session service - login/logout over a token store

use std::sync::Arc;

use localstore_common::auth::{TokenKind, TokenStore};
use localstore_domain::{Credentials, LocalStoreError, Registration, Result};
use tracing::{info, instrument};

use super::ports::AuthPort;

/// Owns the persisted session credentials.
pub struct SessionService {
    auth: Arc<dyn AuthPort>,
    tokens: Arc<dyn TokenStore>,
}

impl SessionService {
    /// Create a new session service
    pub fn new(auth: Arc<dyn AuthPort>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { auth, tokens }
    }

    /// Obtain a token pair and persist both tokens.
    ///
    /// # Errors
    /// `InvalidInput` for a blank username, otherwise whatever the token
    /// endpoint or storage reports.
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(LocalStoreError::InvalidInput("username is required".into()));
        }

        let pair = self.auth.obtain_tokens(&Credentials::new(username, password)).await?;
        self.tokens.set(TokenKind::Access, &pair.access).await?;
        self.tokens.set(TokenKind::Refresh, &pair.refresh).await?;

        info!(username, "signed in");
        Ok(())
    }

    /// Remove both tokens.
    pub async fn logout(&self) -> Result<()> {
        self.tokens.clear().await?;
        info!("signed out");
        Ok(())
    }

    /// Whether an access token is stored.
    pub async fn is_authenticated(&self) -> Result<bool> {
        Ok(self.tokens.get(TokenKind::Access).await?.is_some())
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        self.auth.register(registration).await
    }
}
