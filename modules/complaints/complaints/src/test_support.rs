#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;
use std::time::Duration;

use hostel_security::SessionContext;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use tempfile::TempDir;

use crate::domain::service::ServiceConfig;
use crate::infra::storage::entity::{facility, filter, manager, resident, room, washroom};
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::{OrmComplaintsRepository, OrmDirectoryRepository};
use crate::module::ConcreteAppServices;

/// Create an in-memory database for testing.
pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// File-backed database with a multi-connection pool, migrations applied
/// and the campus seeded. Keep the returned directory alive for the test.
pub async fn pooled_campus_db(max_connections: u32) -> (TempDir, DatabaseConnection) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let dsn = format!("sqlite://{}?mode=rwc", dir.path().join("hostel.db").display());

    let mut opts = ConnectOptions::new(dsn);
    opts.max_connections(max_connections)
        .min_connections(1)
        .sqlx_logging(false)
        .map_sqlx_sqlite_opts(|o| o.busy_timeout(Duration::from_secs(10)));
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to file database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    seed_campus(&db).await;

    (dir, db)
}

#[must_use]
pub fn build_services(db: DatabaseConnection, config: ServiceConfig) -> Arc<ConcreteAppServices> {
    Arc::new(ConcreteAppServices::new(
        OrmComplaintsRepository::new(),
        OrmDirectoryRepository::new(),
        db,
        config,
    ))
}

#[must_use]
pub fn resident_ctx(id: &str, facility_id: Option<&str>) -> SessionContext {
    SessionContext::resident(
        id,
        facility_id.map(str::to_owned),
        format!("{}@hostel.test", id.to_lowercase()),
        id,
    )
}

#[must_use]
pub fn manager_ctx(id: &str, facility_id: &str) -> SessionContext {
    SessionContext::manager(
        id,
        facility_id,
        format!("{}@hostel.test", id.to_lowercase()),
        id,
    )
}

pub async fn seed_facility(db: &DatabaseConnection, id: &str) {
    facility::ActiveModel {
        id: Set(id.to_owned()),
        name: Set(format!("Hostel {id}")),
        manager_name: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to seed facility");
}

pub async fn seed_manager(db: &DatabaseConnection, id: &str, facility_id: &str) {
    manager::ActiveModel {
        id: Set(id.to_owned()),
        name: Set(format!("Manager {id}")),
        email: Set(format!("{}@hostel.test", id.to_lowercase())),
        contact: Set(None),
        facility_id: Set(facility_id.to_owned()),
    }
    .insert(db)
    .await
    .expect("Failed to seed manager");
}

pub async fn seed_resident(db: &DatabaseConnection, id: &str, facility_id: Option<&str>) {
    resident::ActiveModel {
        id: Set(id.to_owned()),
        name: Set(format!("Resident {id}")),
        email: Set(format!("{}@hostel.test", id.to_lowercase())),
        contact: Set(Some("555-0100".to_owned())),
        facility_id: Set(facility_id.map(str::to_owned)),
        room_id: Set(None),
    }
    .insert(db)
    .await
    .expect("Failed to seed resident");
}

pub async fn seed_amenities(db: &DatabaseConnection) {
    for id in ["R101", "R102"] {
        room::ActiveModel {
            id: Set(id.to_owned()),
            occupancy: Set(Some(2)),
            block: Set(Some("A".to_owned())),
            floor: Set(Some(1)),
        }
        .insert(db)
        .await
        .expect("Failed to seed room");
    }
    washroom::ActiveModel {
        id: Set("WR1".to_owned()),
        floor: Set(Some(1)),
        block: Set(Some("A".to_owned())),
    }
    .insert(db)
    .await
    .expect("Failed to seed washroom");
    filter::ActiveModel {
        id: Set("F1".to_owned()),
        floor: Set(Some(0)),
        block: Set(Some("B".to_owned())),
    }
    .insert(db)
    .await
    .expect("Failed to seed filter");
}

/// Two managed facilities and one without a manager:
/// - `H1`: manager `W1`, residents `S1`, `S2`
/// - `H2`: manager `W2`, resident `S3`
/// - `H3`: no manager, resident `S5`
/// - `S4`: unassigned
pub async fn seed_campus(db: &DatabaseConnection) {
    for f in ["H1", "H2", "H3"] {
        seed_facility(db, f).await;
    }
    seed_manager(db, "W1", "H1").await;
    seed_manager(db, "W2", "H2").await;
    seed_resident(db, "S1", Some("H1")).await;
    seed_resident(db, "S2", Some("H1")).await;
    seed_resident(db, "S3", Some("H2")).await;
    seed_resident(db, "S4", None).await;
    seed_resident(db, "S5", Some("H3")).await;
    seed_amenities(db).await;
}

/// In-memory database with migrations applied and the campus seeded.
pub async fn campus_db() -> DatabaseConnection {
    let db = inmem_db().await;
    seed_campus(&db).await;
    db
}
