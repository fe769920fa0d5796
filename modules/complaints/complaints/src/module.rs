use std::sync::Arc;

use authn_resolver_sdk::AuthNResolverClient;
use complaints_sdk::ComplaintsClientV1;
use sea_orm::{DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::ComplaintsConfig;
use crate::domain::local_client::ComplaintsLocalClient;
use crate::domain::service::{AppServices, ServiceConfig};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{OrmComplaintsRepository, OrmDirectoryRepository};

/// Type alias for the concrete `AppServices` type used with ORM repositories.
/// This lives in the composition root (module.rs) to avoid infra dependencies in domain.
pub type ConcreteAppServices = AppServices<OrmComplaintsRepository, OrmDirectoryRepository>;

/// Composition root: repositories, services, SDK client and REST router.
#[derive(Clone)]
pub struct Complaints {
    services: Arc<ConcreteAppServices>,
}

impl Complaints {
    /// Wire the module over an open connection pool.
    #[must_use]
    pub fn new(db: DatabaseConnection, cfg: ComplaintsConfig) -> Self {
        info!("Initializing complaints module");
        debug!(
            "Loaded complaints config: complaint_id_prefix={}, max_description_length={}",
            cfg.complaint_id_prefix, cfg.max_description_length
        );

        let services = Arc::new(AppServices::new(
            OrmComplaintsRepository::new(),
            OrmDirectoryRepository::new(),
            db,
            ServiceConfig::from(cfg),
        ));

        Self { services }
    }

    /// Apply pending schema migrations.
    ///
    /// # Errors
    /// Returns the migration failure as reported by the datastore.
    pub async fn migrate(db: &DatabaseConnection) -> Result<(), DbErr> {
        info!("Applying complaints database migrations");
        Migrator::up(db, None).await
    }

    /// In-process client under the SDK trait.
    #[must_use]
    pub fn client(&self) -> Arc<dyn ComplaintsClientV1> {
        Arc::new(ComplaintsLocalClient::new(Arc::clone(&self.services)))
    }

    /// REST routes, authenticated through `authn_client`.
    #[must_use]
    pub fn router(&self, authn_client: Arc<dyn AuthNResolverClient>) -> axum::Router {
        info!("Registering complaints REST routes");
        routes::register_routes(Arc::clone(&self.services), authn_client)
    }
}
