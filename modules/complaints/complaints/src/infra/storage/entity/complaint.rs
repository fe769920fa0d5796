use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

/// Storage shape of a complaint. The amenity is a discriminant plus three
/// nullable references; exactly one reference is non-null (table CHECK).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "complaints")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub status: String,
    pub created_at: OffsetDateTime,
    pub resident_id: String,
    pub manager_id: String,
    pub facility_id: String,
    pub amenity_kind: String,
    pub room_id: Option<String>,
    pub washroom_id: Option<String>,
    pub filter_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::resident::Entity",
        from = "Column::ResidentId",
        to = "super::resident::Column::Id"
    )]
    Resident,
    #[sea_orm(
        belongs_to = "super::manager::Entity",
        from = "Column::ManagerId",
        to = "super::manager::Column::Id"
    )]
    Manager,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::resident::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Resident.def()
    }
}

impl Related<super::manager::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Manager.def()
    }
}
