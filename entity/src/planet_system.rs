use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::SystemStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "planet_system")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub status: SystemStatus,
    pub created_at: DateTime,
    pub formed_at: Option<DateTime>,
    pub ended_at: Option<DateTime>,
    pub moderator_id: Option<i32>,
    pub star_name: String,
    pub star_type: String,
    #[sea_orm(column_type = "Double")]
    pub star_luminosity: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::UserId",
        to = "super::app_user::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::app_user::Entity",
        from = "Column::ModeratorId",
        to = "super::app_user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Moderator,
    #[sea_orm(has_many = "super::temperature_request::Entity")]
    TemperatureRequest,
}

impl Related<super::app_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::temperature_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemperatureRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
