//! Port interfaces for authentication
//!
//! These traits define the boundary between session logic and the remote
//! token endpoint.

use async_trait::async_trait;
use localstore_domain::{Credentials, Registration, Result, TokenPair};

/// Remote account and token operations.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Exchange credentials for an access/refresh token pair.
    async fn obtain_tokens(&self, credentials: &Credentials) -> Result<TokenPair>;

    /// Create a job seeker or shop owner account.
    async fn register(&self, registration: &Registration) -> Result<()>;
}
