use sea_orm_migration::prelude as mig;

#[derive(mig::DeriveMigrationName)]
pub struct Migration;

#[derive(mig::DeriveIden)]
enum Complaints {
    Table,
    Id,
    Description,
    Status,
    CreatedAt,
    ResidentId,
    ManagerId,
    FacilityId,
    AmenityKind,
    RoomId,
    WashroomId,
    FilterId,
}

#[derive(mig::DeriveIden)]
enum ComplaintSequences {
    Table,
    FacilityId,
    LastValue,
}

#[derive(mig::DeriveIden)]
enum Residents {
    Table,
    Id,
}

#[derive(mig::DeriveIden)]
enum Managers {
    Table,
    Id,
}

#[derive(mig::DeriveIden)]
enum Facilities {
    Table,
    Id,
}

#[derive(mig::DeriveIden)]
enum Rooms {
    Table,
    Id,
}

#[derive(mig::DeriveIden)]
enum Washrooms {
    Table,
    Id,
}

#[derive(mig::DeriveIden)]
enum Filters {
    Table,
    Id,
}

/// Exactly one amenity reference is set, and it agrees with the discriminant.
const AMENITY_CHECK: &str = "(CASE WHEN room_id IS NOT NULL THEN 1 ELSE 0 END) \
     + (CASE WHEN washroom_id IS NOT NULL THEN 1 ELSE 0 END) \
     + (CASE WHEN filter_id IS NOT NULL THEN 1 ELSE 0 END) = 1 \
     AND ((amenity_kind = 'Room' AND room_id IS NOT NULL) \
     OR (amenity_kind = 'Washroom' AND washroom_id IS NOT NULL) \
     OR (amenity_kind = 'Filter' AND filter_id IS NOT NULL))";

#[async_trait::async_trait]
impl mig::MigrationTrait for Migration {
    async fn up(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .create_table(
                mig::Table::create()
                    .table(Complaints::Table)
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(Complaints::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(mig::ColumnDef::new(Complaints::Description).text().not_null())
                    .col(mig::ColumnDef::new(Complaints::Status).string().not_null())
                    .col(
                        mig::ColumnDef::new(Complaints::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(mig::ColumnDef::new(Complaints::ResidentId).string().not_null())
                    .col(mig::ColumnDef::new(Complaints::ManagerId).string().not_null())
                    .col(mig::ColumnDef::new(Complaints::FacilityId).string().not_null())
                    .col(mig::ColumnDef::new(Complaints::AmenityKind).string().not_null())
                    .col(mig::ColumnDef::new(Complaints::RoomId).string().null())
                    .col(mig::ColumnDef::new(Complaints::WashroomId).string().null())
                    .col(mig::ColumnDef::new(Complaints::FilterId).string().null())
                    .check(mig::Expr::col(Complaints::Status).is_in([
                        "Pending",
                        "Resolved",
                        "Confirmed",
                    ]))
                    .check(mig::Expr::cust(AMENITY_CHECK))
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_complaints_resident")
                            .from(Complaints::Table, Complaints::ResidentId)
                            .to(Residents::Table, Residents::Id)
                            .on_delete(mig::ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_complaints_manager")
                            .from(Complaints::Table, Complaints::ManagerId)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(mig::ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_complaints_facility")
                            .from(Complaints::Table, Complaints::FacilityId)
                            .to(Facilities::Table, Facilities::Id)
                            .on_delete(mig::ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_complaints_room")
                            .from(Complaints::Table, Complaints::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(mig::ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_complaints_washroom")
                            .from(Complaints::Table, Complaints::WashroomId)
                            .to(Washrooms::Table, Washrooms::Id)
                            .on_delete(mig::ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_complaints_filter")
                            .from(Complaints::Table, Complaints::FilterId)
                            .to(Filters::Table, Filters::Id)
                            .on_delete(mig::ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                mig::Index::create()
                    .name("idx_complaints_resident_created")
                    .table(Complaints::Table)
                    .col(Complaints::ResidentId)
                    .col(Complaints::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                mig::Index::create()
                    .name("idx_complaints_manager_created")
                    .table(Complaints::Table)
                    .col(Complaints::ManagerId)
                    .col(Complaints::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                mig::Table::create()
                    .table(ComplaintSequences::Table)
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(ComplaintSequences::FacilityId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        mig::ColumnDef::new(ComplaintSequences::LastValue)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .drop_table(mig::Table::drop().table(ComplaintSequences::Table).to_owned())
            .await?;
        manager
            .drop_table(mig::Table::drop().table(Complaints::Table).to_owned())
            .await
    }
}
