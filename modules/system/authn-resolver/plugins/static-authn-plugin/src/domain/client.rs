//! `AuthNResolverClient` implementation backed by the static service.

use async_trait::async_trait;
use authn_resolver_sdk::{AuthNResolverClient, AuthNResolverError, VerifiedIdentity};

use super::service::Service;

#[async_trait]
impl AuthNResolverClient for Service {
    async fn authenticate(
        &self,
        bearer_token: &str,
    ) -> Result<VerifiedIdentity, AuthNResolverError> {
        self.authenticate(bearer_token).ok_or_else(|| {
            tracing::debug!("static authn rejected bearer token");
            AuthNResolverError::Unauthorized("invalid token".to_owned())
        })
    }
}
