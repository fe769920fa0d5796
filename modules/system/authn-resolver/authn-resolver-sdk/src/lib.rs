//! `AuthN` Resolver SDK
//!
//! This crate provides the seam between the complaint service and the external
//! identity provider:
//!
//! - [`AuthNResolverClient`] - API trait the HTTP layer calls with a bearer token
//! - [`VerifiedIdentity`] - the verified `{email, display_name}` pair
//! - [`AuthNResolverError`] - Error types
//!
//! The service never handles credentials itself. Whatever implements
//! [`AuthNResolverClient`] is trusted to have verified the token.
//!
//! ```ignore
//! use authn_resolver_sdk::AuthNResolverClient;
//!
//! let identity = authn.authenticate(token).await?;
//! let session = services.identity.open_session(&identity.email, &identity.display_name).await?;
//! ```

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::AuthNResolverClient;
pub use error::AuthNResolverError;
pub use models::VerifiedIdentity;
