//! Public API trait for the `AuthN` resolver.

use async_trait::async_trait;

use crate::error::AuthNResolverError;
use crate::models::VerifiedIdentity;

/// Verifies bearer tokens issued by the identity provider.
///
/// The HTTP layer holds an `Arc<dyn AuthNResolverClient>` and calls it once
/// per authenticated request:
///
/// ```ignore
/// let identity = authn.authenticate("eyJhbGciOi...").await?;
/// assert!(!identity.email.is_empty());
/// ```
#[async_trait]
pub trait AuthNResolverClient: Send + Sync {
    /// Verify a bearer token and return the identity it asserts.
    ///
    /// # Arguments
    ///
    /// * `bearer_token` - The raw bearer token string (without "Bearer " prefix)
    ///
    /// # Errors
    ///
    /// - `Unauthorized` if the token is invalid, expired, or malformed
    /// - `ServiceUnavailable` if the identity provider cannot be reached
    /// - `Internal` for unexpected errors
    async fn authenticate(&self, bearer_token: &str)
    -> Result<VerifiedIdentity, AuthNResolverError>;
}
