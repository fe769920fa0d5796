use sea_orm_migration::prelude as mig;

#[derive(mig::DeriveMigrationName)]
pub struct Migration;

#[derive(mig::DeriveIden)]
enum Facilities {
    Table,
    Id,
    Name,
    ManagerName,
}

#[derive(mig::DeriveIden)]
enum Rooms {
    Table,
    Id,
    Occupancy,
    Block,
    Floor,
}

#[derive(mig::DeriveIden)]
enum Washrooms {
    Table,
}

#[derive(mig::DeriveIden)]
enum Filters {
    Table,
}

#[derive(mig::DeriveIden)]
enum Managers {
    Table,
    Id,
    Name,
    Email,
    Contact,
    FacilityId,
}

#[derive(mig::DeriveIden)]
enum Residents {
    Table,
    Id,
    Name,
    Email,
    Contact,
    FacilityId,
    RoomId,
}

/// Washrooms and filters share one shape: id plus location.
fn fixture_table(table: impl mig::IntoIden + 'static) -> mig::TableCreateStatement {
    mig::Table::create()
        .table(table)
        .if_not_exists()
        .col(
            mig::ColumnDef::new(mig::Alias::new("id"))
                .string()
                .not_null()
                .primary_key(),
        )
        .col(mig::ColumnDef::new(mig::Alias::new("floor")).integer().null())
        .col(mig::ColumnDef::new(mig::Alias::new("block")).string().null())
        .to_owned()
}

#[async_trait::async_trait]
impl mig::MigrationTrait for Migration {
    async fn up(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .create_table(
                mig::Table::create()
                    .table(Facilities::Table)
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(Facilities::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(mig::ColumnDef::new(Facilities::Name).string().not_null())
                    .col(mig::ColumnDef::new(Facilities::ManagerName).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                mig::Table::create()
                    .table(Rooms::Table)
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(Rooms::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(mig::ColumnDef::new(Rooms::Occupancy).integer().null())
                    .col(mig::ColumnDef::new(Rooms::Block).string().null())
                    .col(mig::ColumnDef::new(Rooms::Floor).integer().null())
                    .to_owned(),
            )
            .await?;

        manager.create_table(fixture_table(Washrooms::Table)).await?;
        manager.create_table(fixture_table(Filters::Table)).await?;

        manager
            .create_table(
                mig::Table::create()
                    .table(Managers::Table)
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(Managers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(mig::ColumnDef::new(Managers::Name).string().not_null())
                    .col(
                        mig::ColumnDef::new(Managers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(mig::ColumnDef::new(Managers::Contact).string().null())
                    // One manager per facility.
                    .col(
                        mig::ColumnDef::new(Managers::FacilityId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_managers_facility")
                            .from(Managers::Table, Managers::FacilityId)
                            .to(Facilities::Table, Facilities::Id)
                            .on_delete(mig::ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                mig::Table::create()
                    .table(Residents::Table)
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(Residents::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(mig::ColumnDef::new(Residents::Name).string().not_null())
                    .col(
                        mig::ColumnDef::new(Residents::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(mig::ColumnDef::new(Residents::Contact).string().null())
                    .col(mig::ColumnDef::new(Residents::FacilityId).string().null())
                    .col(mig::ColumnDef::new(Residents::RoomId).string().null())
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_residents_facility")
                            .from(Residents::Table, Residents::FacilityId)
                            .to(Facilities::Table, Facilities::Id)
                            .on_delete(mig::ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_residents_room")
                            .from(Residents::Table, Residents::RoomId)
                            .to(Rooms::Table, Rooms::Id)
                            .on_delete(mig::ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .drop_table(mig::Table::drop().table(Residents::Table).to_owned())
            .await?;
        manager
            .drop_table(mig::Table::drop().table(Managers::Table).to_owned())
            .await?;
        manager
            .drop_table(mig::Table::drop().table(Filters::Table).to_owned())
            .await?;
        manager
            .drop_table(mig::Table::drop().table(Washrooms::Table).to_owned())
            .await?;
        manager
            .drop_table(mig::Table::drop().table(Rooms::Table).to_owned())
            .await?;
        manager
            .drop_table(mig::Table::drop().table(Facilities::Table).to_owned())
            .await
    }
}
