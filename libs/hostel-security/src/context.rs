use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::principal::{ManagerPrincipal, Principal, ResidentPrincipal, Role};

/// Role checks performed at the entry of every core operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("operation requires the {required} role, session holds {actual}")]
    RoleMismatch { required: Role, actual: Role },
}

/// `SessionContext` carries the authenticated principal for one interaction.
///
/// Built once by the identity resolver after the external identity provider has
/// verified the caller, then passed by reference into every operation. It is
/// immutable: there are no setters, and a new interaction gets a new context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    principal: Principal,
    /// Verified email, the identity key used to resolve the principal.
    email: String,
    /// Display name as reported by the identity provider.
    display_name: String,
}

impl SessionContext {
    #[must_use]
    pub fn new(principal: Principal, email: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            principal,
            email: email.into(),
            display_name: display_name.into(),
        }
    }

    #[must_use]
    pub fn resident(
        id: impl Into<String>,
        facility_id: Option<String>,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self::new(
            Principal::Resident(ResidentPrincipal {
                id: id.into(),
                facility_id,
            }),
            email,
            display_name,
        )
    }

    #[must_use]
    pub fn manager(
        id: impl Into<String>,
        facility_id: impl Into<String>,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        Self::new(
            Principal::Manager(ManagerPrincipal {
                id: id.into(),
                facility_id: facility_id.into(),
            }),
            email,
            display_name,
        )
    }

    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.principal.role()
    }

    /// Resident or manager id, depending on role.
    #[must_use]
    pub fn subject_id(&self) -> &str {
        self.principal.id()
    }

    #[must_use]
    pub fn facility_id(&self) -> Option<&str> {
        self.principal.facility_id()
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Borrow the resident principal or fail with a role mismatch.
    ///
    /// # Errors
    /// Returns [`SessionError::RoleMismatch`] when the session belongs to a manager.
    pub fn require_resident(&self) -> Result<&ResidentPrincipal, SessionError> {
        match &self.principal {
            Principal::Resident(r) => Ok(r),
            Principal::Manager(_) => Err(SessionError::RoleMismatch {
                required: Role::Resident,
                actual: Role::Manager,
            }),
        }
    }

    /// Borrow the manager principal or fail with a role mismatch.
    ///
    /// # Errors
    /// Returns [`SessionError::RoleMismatch`] when the session belongs to a resident.
    pub fn require_manager(&self) -> Result<&ManagerPrincipal, SessionError> {
        match &self.principal {
            Principal::Manager(m) => Ok(m),
            Principal::Resident(_) => Err(SessionError::RoleMismatch {
                required: Role::Manager,
                actual: Role::Resident,
            }),
        }
    }
}
