use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000002_create_planet_table::Planet,
    m20251101_000003_create_planet_system_table::PlanetSystem,
};

static IDX_TEMPERATURE_REQUEST_SYSTEM_ID: &str = "idx_temperature_request_planet_system_id";
static FK_TEMPERATURE_REQUEST_PLANET_ID: &str = "fk_temperature_request_planet_id";
static FK_TEMPERATURE_REQUEST_SYSTEM_ID: &str = "fk_temperature_request_planet_system_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TemperatureRequest::Table)
                    .if_not_exists()
                    .col(integer(TemperatureRequest::PlanetId))
                    .col(integer(TemperatureRequest::PlanetSystemId))
                    .col(integer(TemperatureRequest::Distance))
                    .col(integer_null(TemperatureRequest::Temperature))
                    .primary_key(
                        Index::create()
                            .col(TemperatureRequest::PlanetId)
                            .col(TemperatureRequest::PlanetSystemId),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_TEMPERATURE_REQUEST_SYSTEM_ID)
                    .table(TemperatureRequest::Table)
                    .col(TemperatureRequest::PlanetSystemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TEMPERATURE_REQUEST_PLANET_ID)
                    .from_tbl(TemperatureRequest::Table)
                    .from_col(TemperatureRequest::PlanetId)
                    .to_tbl(Planet::Table)
                    .to_col(Planet::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_TEMPERATURE_REQUEST_SYSTEM_ID)
                    .from_tbl(TemperatureRequest::Table)
                    .from_col(TemperatureRequest::PlanetSystemId)
                    .to_tbl(PlanetSystem::Table)
                    .to_col(PlanetSystem::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_TEMPERATURE_REQUEST_SYSTEM_ID)
                    .table(TemperatureRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_TEMPERATURE_REQUEST_PLANET_ID)
                    .table(TemperatureRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_TEMPERATURE_REQUEST_SYSTEM_ID)
                    .table(TemperatureRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(TemperatureRequest::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum TemperatureRequest {
    Table,
    PlanetId,
    PlanetSystemId,
    Distance,
    Temperature,
}
