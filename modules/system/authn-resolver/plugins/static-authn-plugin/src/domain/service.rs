//! Service implementation for the static `AuthN` resolver plugin.

use std::collections::HashMap;

use authn_resolver_sdk::VerifiedIdentity;

use crate::config::{AuthNMode, IdentityConfig, StaticAuthNPluginConfig};

/// Static `AuthN` resolver service.
///
/// Provides token-to-identity mapping based on configuration mode:
/// - `accept_all`: Any non-empty token maps to the default identity
/// - `static_tokens`: Specific tokens map to specific identities
pub struct Service {
    mode: AuthNMode,
    default_identity: IdentityConfig,
    token_map: HashMap<String, IdentityConfig>,
}

impl Service {
    /// Create a service from plugin configuration.
    #[must_use]
    pub fn from_config(cfg: &StaticAuthNPluginConfig) -> Self {
        let token_map: HashMap<String, IdentityConfig> = cfg
            .tokens
            .iter()
            .map(|m| (m.token.clone(), m.identity.clone()))
            .collect();

        Self {
            mode: cfg.mode.clone(),
            default_identity: cfg.default_identity.clone(),
            token_map,
        }
    }

    /// Resolve a bearer token to the identity it stands for.
    ///
    /// Returns `None` if the token is empty or, in `static_tokens` mode,
    /// not recognized.
    #[must_use]
    pub fn authenticate(&self, bearer_token: &str) -> Option<VerifiedIdentity> {
        if bearer_token.is_empty() {
            return None;
        }

        let identity = match &self.mode {
            AuthNMode::AcceptAll => &self.default_identity,
            AuthNMode::StaticTokens => self.token_map.get(bearer_token)?,
        };

        Some(VerifiedIdentity::new(
            identity.email.clone(),
            identity.display_name.clone(),
        ))
    }
}
