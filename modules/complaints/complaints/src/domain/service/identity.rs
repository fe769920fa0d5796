use std::sync::Arc;

use complaints_sdk::ResolvedIdentity;
use hostel_security::SessionContext;
use sea_orm::DatabaseConnection;
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::repos::DirectoryRepository;

/// Identity resolver: maps a verified email onto a registered principal.
pub struct IdentityService<DR: DirectoryRepository> {
    db: DatabaseConnection,
    directory: Arc<DR>,
}

impl<DR: DirectoryRepository> IdentityService<DR> {
    #[must_use]
    pub fn new(db: DatabaseConnection, directory: Arc<DR>) -> Self {
        Self { db, directory }
    }

    /// Look the email up among managers first, then residents.
    ///
    /// # Errors
    /// `Unauthorized` for an empty email, `NotRegistered` when neither set
    /// contains it, `StoreUnavailable` on datastore failure.
    #[instrument(skip(self))]
    pub async fn resolve(&self, email: &str) -> Result<ResolvedIdentity, DomainError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(DomainError::unauthorized("no verified email"));
        }

        if let Some(manager) = self.directory.find_manager_by_email(&self.db, email).await? {
            tracing::debug!(manager_id = %manager.id, "resolved as manager");
            return Ok(ResolvedIdentity::Manager(manager));
        }
        if let Some(resident) = self.directory.find_resident_by_email(&self.db, email).await? {
            tracing::debug!(resident_id = %resident.id, "resolved as resident");
            return Ok(ResolvedIdentity::Resident(resident));
        }

        tracing::info!("verified identity is not registered");
        Err(DomainError::not_registered(email))
    }

    /// Build the per-interaction session for a verified identity.
    ///
    /// # Errors
    /// Same as [`Self::resolve`].
    #[instrument(skip(self, display_name))]
    pub async fn open_session(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<SessionContext, DomainError> {
        let ctx = match self.resolve(email).await? {
            ResolvedIdentity::Manager(m) => {
                SessionContext::manager(m.id, m.facility_id, m.email, display_name)
            }
            ResolvedIdentity::Resident(r) => {
                SessionContext::resident(r.id, r.facility_id, r.email, display_name)
            }
        };
        tracing::debug!(role = %ctx.role(), subject = ctx.subject_id(), "session opened");
        Ok(ctx)
    }
}
