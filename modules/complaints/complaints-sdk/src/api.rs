//! Transport-agnostic client contract.

use async_trait::async_trait;
use hostel_security::SessionContext;

use crate::errors::ComplaintsError;
use crate::models::{Complaint, ComplaintStats, ManagedComplaint, NewComplaint};

/// Operations the complaints module exposes to presentation layers.
///
/// Resident-only and manager-only operations fail with
/// [`ComplaintsError::Unauthorized`] when called with the other role.
#[async_trait]
pub trait ComplaintsClientV1: Send + Sync {
    /// Resolve a verified identity to a session.
    async fn open_session(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<SessionContext, ComplaintsError>;

    /// File a complaint (resident only). Returns the stored record.
    async fn file_complaint(
        &self,
        ctx: &SessionContext,
        new_complaint: NewComplaint,
    ) -> Result<Complaint, ComplaintsError>;

    /// Complaints filed by the session's resident, newest first.
    async fn list_my_complaints(&self, ctx: &SessionContext)
    -> Result<Vec<Complaint>, ComplaintsError>;

    /// Confirm a resolved complaint (filing resident only).
    async fn confirm_resolution(
        &self,
        ctx: &SessionContext,
        complaint_id: &str,
    ) -> Result<(), ComplaintsError>;

    /// Complaints routed to the session's manager, newest first.
    async fn list_managed_complaints(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<ManagedComplaint>, ComplaintsError>;

    /// Mark a pending complaint resolved (routed manager only).
    async fn resolve_complaint(
        &self,
        ctx: &SessionContext,
        complaint_id: &str,
    ) -> Result<(), ComplaintsError>;

    /// Per-status counts for the session's manager.
    async fn get_stats(&self, ctx: &SessionContext) -> Result<ComplaintStats, ComplaintsError>;
}
