use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "planet")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Double")]
    pub albedo: f64,
    pub image: Option<String>,
    pub is_deleted: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::temperature_request::Entity")]
    TemperatureRequest,
}

impl Related<super::temperature_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TemperatureRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
