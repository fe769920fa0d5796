//! Domain service layer - business logic and rules.
//!
//! ## Architecture
//!
//! Per-concern submodules:
//! - `identity` - verified email to registered principal, session construction
//! - `routing` - facility to responsible manager
//! - `complaints` - filing, listing and lifecycle transitions
//! - `stats` - per-manager status counts
//!
//! ## Layering Rules
//!
//! The domain layer:
//! - **MAY** import: `complaints_sdk` (contract types), `hostel_security`, repository traits
//! - **MUST NOT** import: `api::*` (one-way dependency: API -> Domain)
//!
//! ## Security
//!
//! Every operation takes a [`SessionContext`](hostel_security::SessionContext)
//! and checks its role before touching the store. Ownership is enforced in the
//! query itself: a resident only ever matches rows they filed, a manager only
//! rows routed to them in their own facility.
//!
//! ## Connection Management
//!
//! Services hold the pool handle and open transactions themselves. Handlers
//! call service methods with business parameters only.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::ComplaintsConfig;
use crate::domain::repos::{ComplaintsRepository, DirectoryRepository};

mod complaints;
mod identity;
mod routing;
mod stats;

pub use complaints::ComplaintsService;
pub use identity::IdentityService;
pub use routing::RoutingService;
pub use stats::StatsService;

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub complaint_id_prefix: String,
    pub max_description_length: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ComplaintsConfig::default().into()
    }
}

impl From<ComplaintsConfig> for ServiceConfig {
    fn from(cfg: ComplaintsConfig) -> Self {
        Self {
            complaint_id_prefix: cfg.complaint_id_prefix,
            max_description_length: cfg.max_description_length,
        }
    }
}

// DI Container - aggregates all domain services
pub struct AppServices<CR, DR>
where
    CR: ComplaintsRepository + 'static,
    DR: DirectoryRepository + 'static,
{
    pub identity: IdentityService<DR>,
    pub complaints: ComplaintsService<CR, DR>,
    pub stats: StatsService<CR>,
}

#[cfg(test)]
mod tests_lifecycle;

#[cfg(test)]
mod tests_scoping;

#[cfg(test)]
mod tests_concurrency;

impl<CR, DR> AppServices<CR, DR>
where
    CR: ComplaintsRepository + 'static,
    DR: DirectoryRepository + 'static,
{
    #[must_use]
    pub fn new(
        complaints_repo: CR,
        directory_repo: DR,
        db: DatabaseConnection,
        config: ServiceConfig,
    ) -> Self {
        let complaints_repo = Arc::new(complaints_repo);
        let directory_repo = Arc::new(directory_repo);

        let routing = Arc::new(RoutingService::new(Arc::clone(&directory_repo)));

        Self {
            identity: IdentityService::new(db.clone(), Arc::clone(&directory_repo)),
            complaints: ComplaintsService::new(
                db.clone(),
                Arc::clone(&complaints_repo),
                directory_repo,
                routing,
                config,
            ),
            stats: StatsService::new(db, complaints_repo),
        }
    }
}
