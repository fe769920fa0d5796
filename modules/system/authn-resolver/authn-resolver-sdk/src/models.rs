//! Domain models for the `AuthN` resolver.

use serde::{Deserialize, Serialize};

/// Identity asserted by a verified token.
///
/// `email` is the key used to look up the resident or manager profile;
/// `display_name` is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedIdentity {
    pub email: String,
    pub display_name: String,
}

impl VerifiedIdentity {
    #[must_use]
    pub fn new(email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
        }
    }
}
