use std::sync::Arc;

use complaints_sdk::ComplaintStats;
use hostel_security::SessionContext;
use sea_orm::DatabaseConnection;
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::repos::ComplaintsRepository;

/// Statistics aggregator.
pub struct StatsService<CR: ComplaintsRepository> {
    db: DatabaseConnection,
    repo: Arc<CR>,
}

impl<CR: ComplaintsRepository> StatsService<CR> {
    #[must_use]
    pub fn new(db: DatabaseConnection, repo: Arc<CR>) -> Self {
        Self { db, repo }
    }

    /// Per-status counts of complaints routed to the session's manager.
    ///
    /// # Errors
    /// `Unauthorized` for a resident session, `StoreUnavailable` on datastore failure.
    #[instrument(skip(self, ctx), fields(subject = ctx.subject_id()))]
    pub async fn get_stats(&self, ctx: &SessionContext) -> Result<ComplaintStats, DomainError> {
        let manager = ctx.require_manager()?;
        let stats = self
            .repo
            .stats_for_manager(&self.db, &manager.id, &manager.facility_id)
            .await?;
        tracing::debug!(total = stats.total, "stats computed");
        Ok(stats)
    }
}
