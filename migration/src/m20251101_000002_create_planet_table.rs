use sea_orm_migration::{prelude::*, schema::*};

static IDX_PLANET_IS_DELETED: &str = "idx_planet_is_deleted";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Planet::Table)
                    .if_not_exists()
                    .col(pk_auto(Planet::Id))
                    .col(string(Planet::Title))
                    .col(text(Planet::Description))
                    .col(double(Planet::Albedo))
                    .col(string_null(Planet::Image))
                    .col(boolean(Planet::IsDeleted))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PLANET_IS_DELETED)
                    .table(Planet::Table)
                    .col(Planet::IsDeleted)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PLANET_IS_DELETED)
                    .table(Planet::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Planet::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Planet {
    Table,
    Id,
    Title,
    Description,
    Albedo,
    Image,
    IsDeleted,
}
