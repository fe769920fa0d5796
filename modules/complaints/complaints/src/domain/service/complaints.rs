use std::sync::Arc;

use complaints_sdk::{Complaint, ComplaintStatus, ManagedComplaint, NewComplaint};
use hostel_security::SessionContext;
use sea_orm::{DatabaseConnection, TransactionTrait};
use time::OffsetDateTime;
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::lifecycle::{Transition, complaint_id, validate_new_complaint};
use crate::domain::repos::{ComplaintOwner, ComplaintsRepository, DirectoryRepository};
use crate::domain::service::{RoutingService, ServiceConfig};
use crate::infra::storage::db::db_err;

/// Complaints service: filing, listing, and lifecycle transitions.
pub struct ComplaintsService<CR: ComplaintsRepository, DR: DirectoryRepository> {
    db: DatabaseConnection,
    repo: Arc<CR>,
    directory: Arc<DR>,
    routing: Arc<RoutingService<DR>>,
    config: ServiceConfig,
}

impl<CR: ComplaintsRepository, DR: DirectoryRepository> ComplaintsService<CR, DR> {
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        repo: Arc<CR>,
        directory: Arc<DR>,
        routing: Arc<RoutingService<DR>>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            db,
            repo,
            directory,
            routing,
            config,
        }
    }
}

fn now_utc() -> OffsetDateTime {
    // Postgres keeps microseconds; trim so the returned record equals the stored one.
    let now = OffsetDateTime::now_utc();
    now.replace_microsecond(now.microsecond()).unwrap_or(now)
}

fn require_id(complaint_id: &str) -> Result<&str, DomainError> {
    let id = complaint_id.trim();
    if id.is_empty() {
        return Err(DomainError::missing_field("complaint_id"));
    }
    Ok(id)
}

// Business logic methods
impl<CR: ComplaintsRepository, DR: DirectoryRepository> ComplaintsService<CR, DR> {
    /// File a complaint for the session's resident.
    ///
    /// Id allocation, routing, the amenity check and the insert share one
    /// transaction.
    ///
    /// # Errors
    /// `Unauthorized` for a manager session; input errors from
    /// [`validate_new_complaint`]; `NoManagerAssigned` when the resident's
    /// facility has no manager; `NotFound` when the amenity does not exist.
    #[instrument(skip(self, ctx, new_complaint), fields(subject = ctx.subject_id()))]
    pub async fn file_complaint(
        &self,
        ctx: &SessionContext,
        new_complaint: NewComplaint,
    ) -> Result<Complaint, DomainError> {
        let resident = ctx.require_resident()?;
        let input = validate_new_complaint(&new_complaint, self.config.max_description_length)?;

        let Some(facility_id) = resident.facility_id.as_deref() else {
            tracing::info!("resident has no facility assignment");
            return Err(DomainError::no_manager_assigned(None));
        };

        let txn = self.db.begin().await.map_err(db_err)?;

        // Sequence bump first: the transaction must hold the write lock before
        // it reads (SQLite cannot upgrade a shared lock under contention).
        // A rollback undoes the bump.
        let seq = self.repo.next_sequence(&txn, facility_id).await?;

        let manager = self.routing.route(&txn, Some(facility_id)).await?;

        if !self.directory.amenity_exists(&txn, &input.amenity).await? {
            tracing::info!(amenity = %input.amenity.kind(), amenity_id = input.amenity.id(), "amenity not found");
            return Err(DomainError::not_found(input.amenity.id()));
        }

        let complaint = Complaint {
            id: complaint_id(&self.config.complaint_id_prefix, &manager.facility_id, seq),
            description: input.description,
            status: ComplaintStatus::Pending,
            created_at: now_utc(),
            resident_id: resident.id.clone(),
            manager_id: manager.id,
            facility_id: manager.facility_id,
            amenity: input.amenity,
        };
        let complaint = self.repo.create(&txn, complaint).await?;

        txn.commit().await.map_err(db_err)?;

        tracing::info!(complaint_id = %complaint.id, manager_id = %complaint.manager_id, "complaint filed");
        Ok(complaint)
    }

    /// Complaints filed by the session's resident, newest first.
    ///
    /// # Errors
    /// `Unauthorized` for a manager session, `StoreUnavailable` on datastore failure.
    #[instrument(skip(self, ctx), fields(subject = ctx.subject_id()))]
    pub async fn list_my_complaints(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<Complaint>, DomainError> {
        let resident = ctx.require_resident()?;
        let complaints = self.repo.list_by_resident(&self.db, &resident.id).await?;
        tracing::debug!(count = complaints.len(), "listed resident complaints");
        Ok(complaints)
    }

    /// Complaints routed to the session's manager, newest first.
    ///
    /// # Errors
    /// `Unauthorized` for a resident session, `StoreUnavailable` on datastore failure.
    #[instrument(skip(self, ctx), fields(subject = ctx.subject_id()))]
    pub async fn list_managed_complaints(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<ManagedComplaint>, DomainError> {
        let manager = ctx.require_manager()?;
        let complaints = self
            .repo
            .list_by_manager(&self.db, &manager.id, &manager.facility_id)
            .await?;
        tracing::debug!(count = complaints.len(), "listed managed complaints");
        Ok(complaints)
    }

    /// `Pending -> Resolved`, by the routed manager of the complaint's facility.
    ///
    /// # Errors
    /// `Unauthorized` for a resident session; `NotFound` when the complaint
    /// does not exist or is routed elsewhere; `InvalidTransition` when it is
    /// not `Pending`.
    #[instrument(skip(self, ctx), fields(subject = ctx.subject_id()))]
    pub async fn resolve_complaint(
        &self,
        ctx: &SessionContext,
        complaint_id: &str,
    ) -> Result<(), DomainError> {
        let manager = ctx.require_manager()?;
        let owner = ComplaintOwner::Manager {
            manager_id: &manager.id,
            facility_id: &manager.facility_id,
        };
        self.apply(Transition::Resolve, require_id(complaint_id)?, owner)
            .await
    }

    /// `Resolved -> Confirmed`, by the resident who filed the complaint.
    ///
    /// # Errors
    /// `Unauthorized` for a manager session; `NotFound` when the complaint
    /// does not exist or was filed by someone else; `InvalidTransition` when
    /// it is not `Resolved`.
    #[instrument(skip(self, ctx), fields(subject = ctx.subject_id()))]
    pub async fn confirm_resolution(
        &self,
        ctx: &SessionContext,
        complaint_id: &str,
    ) -> Result<(), DomainError> {
        let resident = ctx.require_resident()?;
        let owner = ComplaintOwner::Resident {
            resident_id: &resident.id,
        };
        self.apply(Transition::Confirm, require_id(complaint_id)?, owner)
            .await
    }

    /// One conditional update; on a miss, an ownership lookup tells a
    /// foreign/absent complaint apart from one in the wrong status.
    async fn apply(
        &self,
        transition: Transition,
        id: &str,
        owner: ComplaintOwner<'_>,
    ) -> Result<(), DomainError> {
        if self
            .repo
            .update_status(&self.db, id, owner, transition.from(), transition.to())
            .await?
        {
            tracing::info!(complaint_id = id, actor = %transition.actor(), status = %transition.to(), "complaint status changed");
            return Ok(());
        }

        match self.repo.find_for_transition(&self.db, id, owner).await? {
            None => {
                tracing::debug!(complaint_id = id, "no complaint under caller's ownership");
                Err(DomainError::not_found(id))
            }
            Some(current) => {
                tracing::debug!(complaint_id = id, current = %current.status, "transition rejected");
                Err(transition.rejected(id, current.status))
            }
        }
    }
}
