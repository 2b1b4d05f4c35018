use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000001_create_app_user_table::AppUser;

static IDX_PLANET_SYSTEM_USER_ID: &str = "idx_planet_system_user_id";
static IDX_PLANET_SYSTEM_STATUS: &str = "idx_planet_system_status";
static IDX_PLANET_SYSTEM_ONE_DRAFT_PER_USER: &str = "idx_planet_system_one_draft_per_user";
static FK_PLANET_SYSTEM_USER_ID: &str = "fk_planet_system_user_id";
static FK_PLANET_SYSTEM_MODERATOR_ID: &str = "fk_planet_system_moderator_id";

/// Partial unique index allowing at most one draft per user
///
/// Written as raw SQL, the query builder has no portable form for the WHERE clause.
pub fn one_draft_per_user_index() -> String {
    format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS {} ON planet_system (user_id) WHERE status = 'draft'",
        IDX_PLANET_SYSTEM_ONE_DRAFT_PER_USER
    )
}

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlanetSystem::Table)
                    .if_not_exists()
                    .col(pk_auto(PlanetSystem::Id))
                    .col(integer(PlanetSystem::UserId))
                    .col(string_len(PlanetSystem::Status, 16))
                    .col(timestamp(PlanetSystem::CreatedAt))
                    .col(timestamp_null(PlanetSystem::FormedAt))
                    .col(timestamp_null(PlanetSystem::EndedAt))
                    .col(integer_null(PlanetSystem::ModeratorId))
                    .col(string(PlanetSystem::StarName))
                    .col(string(PlanetSystem::StarType))
                    .col(double(PlanetSystem::StarLuminosity))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PLANET_SYSTEM_USER_ID)
                    .table(PlanetSystem::Table)
                    .col(PlanetSystem::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PLANET_SYSTEM_STATUS)
                    .table(PlanetSystem::Table)
                    .col(PlanetSystem::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&one_draft_per_user_index())
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PLANET_SYSTEM_USER_ID)
                    .from_tbl(PlanetSystem::Table)
                    .from_col(PlanetSystem::UserId)
                    .to_tbl(AppUser::Table)
                    .to_col(AppUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PLANET_SYSTEM_MODERATOR_ID)
                    .from_tbl(PlanetSystem::Table)
                    .from_col(PlanetSystem::ModeratorId)
                    .to_tbl(AppUser::Table)
                    .to_col(AppUser::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PLANET_SYSTEM_MODERATOR_ID)
                    .table(PlanetSystem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PLANET_SYSTEM_USER_ID)
                    .table(PlanetSystem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "DROP INDEX IF EXISTS {}",
                IDX_PLANET_SYSTEM_ONE_DRAFT_PER_USER
            ))
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PLANET_SYSTEM_STATUS)
                    .table(PlanetSystem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PLANET_SYSTEM_USER_ID)
                    .table(PlanetSystem::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(PlanetSystem::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PlanetSystem {
    Table,
    Id,
    UserId,
    Status,
    CreatedAt,
    FormedAt,
    EndedAt,
    ModeratorId,
    StarName,
    StarType,
    StarLuminosity,
}
