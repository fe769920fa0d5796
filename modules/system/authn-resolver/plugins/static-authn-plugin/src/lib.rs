#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Static `AuthN` Resolver Plugin
//!
//! Stands in for the external identity provider during development and tests.
//!
//! ## Modes
//!
//! - **`accept_all`** (default): Accepts any non-empty token, returns the configured
//!   default identity.
//!
//! - **`static_tokens`**: Maps specific tokens to specific identities. Useful for E2E tests
//!   with distinct residents and managers.
//!
//! ## Configuration
//!
//! ```yaml
//! authn:
//!   mode: static_tokens
//!   tokens:
//!     - token: "resident-asha"
//!       identity:
//!         email: "asha@hostel.test"
//!         display_name: "Asha"
//! ```

pub mod config;
pub mod domain;

pub use config::StaticAuthNPluginConfig;
pub use domain::service::Service as StaticAuthNService;
