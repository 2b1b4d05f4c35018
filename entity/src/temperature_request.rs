use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "temperature_request")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub planet_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub planet_system_id: i32,
    pub distance: i32,
    pub temperature: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::planet::Entity",
        from = "Column::PlanetId",
        to = "super::planet::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Planet,
    #[sea_orm(
        belongs_to = "super::planet_system::Entity",
        from = "Column::PlanetSystemId",
        to = "super::planet_system::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    PlanetSystem,
}

impl Related<super::planet::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Planet.def()
    }
}

impl Related<super::planet_system::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PlanetSystem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
