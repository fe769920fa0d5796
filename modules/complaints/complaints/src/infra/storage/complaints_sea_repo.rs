use async_trait::async_trait;
use complaints_sdk::{Complaint, ComplaintStats, ComplaintStatus, ManagedComplaint};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

use crate::domain::error::DomainError;
use crate::domain::repos::{ComplaintOwner, ComplaintsRepository};
use crate::infra::storage::db::db_err;
use crate::infra::storage::entity::complaint::{
    self, ActiveModel as ComplaintAM, Column, Entity as ComplaintEntity,
};
use crate::infra::storage::entity::{complaint_sequence, resident};

/// ORM-based implementation of the `ComplaintsRepository` trait.
#[derive(Clone, Default)]
pub struct OrmComplaintsRepository;

impl OrmComplaintsRepository {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn owner_condition(owner: ComplaintOwner<'_>) -> Condition {
    match owner {
        ComplaintOwner::Resident { resident_id } => {
            Condition::all().add(Column::ResidentId.eq(resident_id))
        }
        ComplaintOwner::Manager {
            manager_id,
            facility_id,
        } => Condition::all()
            .add(Column::ManagerId.eq(manager_id))
            .add(Column::FacilityId.eq(facility_id)),
    }
}

fn into_complaints(rows: Vec<complaint::Model>) -> Result<Vec<Complaint>, DomainError> {
    rows.into_iter().map(Complaint::try_from).collect()
}

#[async_trait]
impl ComplaintsRepository for OrmComplaintsRepository {
    async fn next_sequence<C: ConnectionTrait>(
        &self,
        conn: &C,
        facility_id: &str,
    ) -> Result<i64, DomainError> {
        let seed = complaint_sequence::ActiveModel {
            facility_id: Set(facility_id.to_owned()),
            last_value: Set(1),
        };

        // Single statement: first use inserts 1, later uses increment in place.
        complaint_sequence::Entity::insert(seed)
            .on_conflict(
                OnConflict::column(complaint_sequence::Column::FacilityId)
                    .value(
                        complaint_sequence::Column::LastValue,
                        Expr::col((
                            complaint_sequence::Entity,
                            complaint_sequence::Column::LastValue,
                        ))
                        .add(1),
                    )
                    .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(db_err)?;

        let row = complaint_sequence::Entity::find_by_id(facility_id.to_owned())
            .one(conn)
            .await
            .map_err(db_err)?
            .ok_or_else(|| {
                DomainError::internal(format!("sequence for facility {facility_id} vanished"))
            })?;
        Ok(row.last_value)
    }

    async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        complaint: Complaint,
    ) -> Result<Complaint, DomainError> {
        let m = ComplaintAM::from(&complaint);
        ComplaintEntity::insert(m)
            .exec_without_returning(conn)
            .await
            .map_err(db_err)?;
        Ok(complaint)
    }

    async fn list_by_resident<C: ConnectionTrait>(
        &self,
        conn: &C,
        resident_id: &str,
    ) -> Result<Vec<Complaint>, DomainError> {
        let rows = ComplaintEntity::find()
            .filter(owner_condition(ComplaintOwner::Resident { resident_id }))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;
        into_complaints(rows)
    }

    async fn list_by_manager<C: ConnectionTrait>(
        &self,
        conn: &C,
        manager_id: &str,
        facility_id: &str,
    ) -> Result<Vec<ManagedComplaint>, DomainError> {
        let rows = ComplaintEntity::find()
            .filter(owner_condition(ComplaintOwner::Manager {
                manager_id,
                facility_id,
            }))
            .find_also_related(resident::Entity)
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(conn)
            .await
            .map_err(db_err)?;

        rows.into_iter()
            .map(|(row, filer)| {
                let filer = filer.ok_or_else(|| {
                    DomainError::internal(format!("complaint {} has no filing resident", row.id))
                })?;
                Ok(ManagedComplaint {
                    complaint: Complaint::try_from(row)?,
                    resident_name: filer.name,
                    resident_email: filer.email,
                })
            })
            .collect()
    }

    async fn find_for_transition<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
        owner: ComplaintOwner<'_>,
    ) -> Result<Option<Complaint>, DomainError> {
        let found = ComplaintEntity::find()
            .filter(Column::Id.eq(id))
            .filter(owner_condition(owner))
            .one(conn)
            .await
            .map_err(db_err)?;
        found.map(Complaint::try_from).transpose()
    }

    async fn update_status<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: &str,
        owner: ComplaintOwner<'_>,
        from: ComplaintStatus,
        to: ComplaintStatus,
    ) -> Result<bool, DomainError> {
        let result = ComplaintEntity::update_many()
            .col_expr(Column::Status, Expr::value(to.as_str()))
            .filter(Column::Id.eq(id))
            .filter(owner_condition(owner))
            .filter(Column::Status.eq(from.as_str()))
            .exec(conn)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn stats_for_manager<C: ConnectionTrait>(
        &self,
        conn: &C,
        manager_id: &str,
        facility_id: &str,
    ) -> Result<ComplaintStats, DomainError> {
        let rows: Vec<(String, i64)> = ComplaintEntity::find()
            .select_only()
            .column(Column::Status)
            .column_as(Expr::col(Column::Id).count(), "count")
            .filter(owner_condition(ComplaintOwner::Manager {
                manager_id,
                facility_id,
            }))
            .group_by(Column::Status)
            .into_tuple()
            .all(conn)
            .await
            .map_err(db_err)?;

        let mut stats = ComplaintStats::default();
        for (status, count) in rows {
            let status: ComplaintStatus = status
                .parse::<ComplaintStatus>()
                .map_err(|e| DomainError::internal(e.to_string()))?;
            let count = u64::try_from(count)
                .map_err(|_| DomainError::internal("negative complaint count"))?;
            stats.record(status, count);
        }
        Ok(stats)
    }
}
