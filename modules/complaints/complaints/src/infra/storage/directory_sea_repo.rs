use async_trait::async_trait;
use complaints_sdk::{AmenityRef, ManagerProfile, ResidentProfile};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter};

use crate::domain::error::DomainError;
use crate::domain::repos::DirectoryRepository;
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::{filter, manager, resident, room, washroom};

/// ORM-based implementation of the `DirectoryRepository` trait.
#[derive(Clone, Default)]
pub struct OrmDirectoryRepository;

impl OrmDirectoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DirectoryRepository for OrmDirectoryRepository {
    async fn find_manager_by_email<C: ConnectionTrait>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<Option<ManagerProfile>, DomainError> {
        let found = manager::Entity::find()
            .filter(manager::Column::Email.eq(email))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_resident_by_email<C: ConnectionTrait>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<Option<ResidentProfile>, DomainError> {
        let found = resident::Entity::find()
            .filter(resident::Column::Email.eq(email))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn find_manager_for_facility<C: ConnectionTrait>(
        &self,
        conn: &C,
        facility_id: &str,
    ) -> Result<Option<ManagerProfile>, DomainError> {
        let found = manager::Entity::find()
            .filter(manager::Column::FacilityId.eq(facility_id))
            .one(conn)
            .await
            .map_err(db_err)?;
        Ok(found.map(Into::into))
    }

    async fn amenity_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        amenity: &AmenityRef,
    ) -> Result<bool, DomainError> {
        let count = match amenity {
            AmenityRef::Room(id) => {
                room::Entity::find()
                    .filter(room::Column::Id.eq(id.as_str()))
                    .count(conn)
                    .await
            }
            AmenityRef::Washroom(id) => {
                washroom::Entity::find()
                    .filter(washroom::Column::Id.eq(id.as_str()))
                    .count(conn)
                    .await
            }
            AmenityRef::Filter(id) => {
                filter::Entity::find()
                    .filter(filter::Column::Id.eq(id.as_str()))
                    .count(conn)
                    .await
            }
        }
        .map_err(db_err)?;
        Ok(count > 0)
    }
}
