//! Repository traits. Implementations live in `infra::storage`.
//!
//! Every method takes the connection explicitly so services can run several
//! calls inside one transaction.

use async_trait::async_trait;
use complaints_sdk::{
    AmenityRef, Complaint, ComplaintStats, ComplaintStatus, ManagedComplaint, ManagerProfile,
    ResidentProfile,
};
use sea_orm::ConnectionTrait;

use crate::domain::error::DomainError;

/// Who a complaint must belong to for a lookup or update to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComplaintOwner<'a> {
    /// The filing resident.
    Resident { resident_id: &'a str },
    /// The routed manager, in the facility the complaint was filed for.
    Manager {
        manager_id: &'a str,
        facility_id: &'a str,
    },
}

/// Residents, managers, facilities and amenities.
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    async fn find_manager_by_email<C: ConnectionTrait>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<Option<ManagerProfile>, DomainError>;

    async fn find_resident_by_email<C: ConnectionTrait>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<Option<ResidentProfile>, DomainError>;

    /// The manager assigned to `facility_id`, if any.
    async fn find_manager_for_facility<C: ConnectionTrait>(
        &self,
        conn: &C,
        facility_id: &str,
    ) -> Result<Option<ManagerProfile>, DomainError>;

    async fn amenity_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        amenity: &AmenityRef,
    ) -> Result<bool, DomainError>;
}

/// Complaint records and the per-facility id sequence.
#[async_trait]
pub trait ComplaintsRepository: Send + Sync {
    /// Atomically advance the facility's counter and return the new value.
    async fn next_sequence<C: ConnectionTrait>(
        &self,
        conn: &C,
        facility_id: &str,
    ) -> Result<i64, DomainError>;

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        complaint: Complaint,
    ) -> Result<Complaint, DomainError>;

    /// Newest first, ties broken by id descending.
    async fn list_by_resident<C: ConnectionTrait>(
        &self,
        conn: &C,
        resident_id: &str,
    ) -> Result<Vec<Complaint>, DomainError>;

    /// Newest first, ties broken by id descending, with filer display fields.
    async fn list_by_manager<C: ConnectionTrait>(
        &self,
        conn: &C,
        manager_id: &str,
        facility_id: &str,
    ) -> Result<Vec<ManagedComplaint>, DomainError>;

    /// Status-agnostic lookup under ownership constraints.
    async fn find_for_transition<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
        owner: ComplaintOwner<'_>,
    ) -> Result<Option<Complaint>, DomainError>;

    /// Set `to` only where the row is owned by `owner` and currently `from`.
    /// Returns whether a row changed.
    async fn update_status<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
        owner: ComplaintOwner<'_>,
        from: ComplaintStatus,
        to: ComplaintStatus,
    ) -> Result<bool, DomainError>;

    async fn stats_for_manager<C: ConnectionTrait>(
        &self,
        conn: &C,
        manager_id: &str,
        facility_id: &str,
    ) -> Result<ComplaintStats, DomainError>;
}
