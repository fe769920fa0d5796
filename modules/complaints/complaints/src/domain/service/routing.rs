use std::sync::Arc;

use complaints_sdk::ManagerProfile;
use sea_orm::ConnectionTrait;
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::repos::DirectoryRepository;

/// Routing resolver: facility to the manager responsible for it.
pub struct RoutingService<DR: DirectoryRepository> {
    directory: Arc<DR>,
}

impl<DR: DirectoryRepository> RoutingService<DR> {
    #[must_use]
    pub fn new(directory: Arc<DR>) -> Self {
        Self { directory }
    }

    /// Find the manager for `facility_id` on the caller's connection, so the
    /// lookup joins whatever transaction the caller has open.
    ///
    /// # Errors
    /// `NoManagerAssigned` when the facility is absent (unassigned resident)
    /// or has no manager.
    #[instrument(skip(self, conn))]
    pub async fn route<C: ConnectionTrait>(
        &self,
        conn: &C,
        facility_id: Option<&str>,
    ) -> Result<ManagerProfile, DomainError> {
        let Some(facility_id) = facility_id else {
            tracing::info!("resident has no facility assignment");
            return Err(DomainError::no_manager_assigned(None));
        };

        self.directory
            .find_manager_for_facility(conn, facility_id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(facility_id, "facility has no manager assigned");
                DomainError::no_manager_assigned(Some(facility_id.to_owned()))
            })
    }
}
