//! Local (in-process) client for the complaints module.

use std::sync::Arc;

use async_trait::async_trait;
use complaints_sdk::{
    Complaint, ComplaintStats, ComplaintsClientV1, ComplaintsError, ManagedComplaint, NewComplaint,
};
use hostel_security::SessionContext;

use crate::domain::error::DomainError;
use crate::domain::repos::{ComplaintsRepository, DirectoryRepository};
use crate::domain::service::AppServices;

/// Local client wrapping the domain services.
pub struct ComplaintsLocalClient<CR, DR>
where
    CR: ComplaintsRepository + 'static,
    DR: DirectoryRepository + 'static,
{
    services: Arc<AppServices<CR, DR>>,
}

impl<CR, DR> ComplaintsLocalClient<CR, DR>
where
    CR: ComplaintsRepository + 'static,
    DR: DirectoryRepository + 'static,
{
    #[must_use]
    pub fn new(services: Arc<AppServices<CR, DR>>) -> Self {
        Self { services }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> ComplaintsError {
    match &e {
        DomainError::StoreUnavailable { .. } | DomainError::Internal { .. } => {
            tracing::error!(operation = op, error = %e, "complaints call failed");
        }
        _ => tracing::debug!(operation = op, error = %e, "complaints call rejected"),
    }
    e.into()
}

#[async_trait]
impl<CR, DR> ComplaintsClientV1 for ComplaintsLocalClient<CR, DR>
where
    CR: ComplaintsRepository + 'static,
    DR: DirectoryRepository + 'static,
{
    async fn open_session(
        &self,
        email: &str,
        display_name: &str,
    ) -> Result<SessionContext, ComplaintsError> {
        self.services
            .identity
            .open_session(email, display_name)
            .await
            .map_err(|e| log_and_convert("open_session", e))
    }

    async fn file_complaint(
        &self,
        ctx: &SessionContext,
        new_complaint: NewComplaint,
    ) -> Result<Complaint, ComplaintsError> {
        self.services
            .complaints
            .file_complaint(ctx, new_complaint)
            .await
            .map_err(|e| log_and_convert("file_complaint", e))
    }

    async fn list_my_complaints(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<Complaint>, ComplaintsError> {
        self.services
            .complaints
            .list_my_complaints(ctx)
            .await
            .map_err(|e| log_and_convert("list_my_complaints", e))
    }

    async fn confirm_resolution(
        &self,
        ctx: &SessionContext,
        complaint_id: &str,
    ) -> Result<(), ComplaintsError> {
        self.services
            .complaints
            .confirm_resolution(ctx, complaint_id)
            .await
            .map_err(|e| log_and_convert("confirm_resolution", e))
    }

    async fn list_managed_complaints(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<ManagedComplaint>, ComplaintsError> {
        self.services
            .complaints
            .list_managed_complaints(ctx)
            .await
            .map_err(|e| log_and_convert("list_managed_complaints", e))
    }

    async fn resolve_complaint(
        &self,
        ctx: &SessionContext,
        complaint_id: &str,
    ) -> Result<(), ComplaintsError> {
        self.services
            .complaints
            .resolve_complaint(ctx, complaint_id)
            .await
            .map_err(|e| log_and_convert("resolve_complaint", e))
    }

    async fn get_stats(&self, ctx: &SessionContext) -> Result<ComplaintStats, ComplaintsError> {
        self.services
            .stats
            .get_stats(ctx)
            .await
            .map_err(|e| log_and_convert("get_stats", e))
    }
}
