use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::SystemStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

/// Star parameters given to new drafts
pub static DEFAULT_STAR_NAME: &str = "Sun";
pub static DEFAULT_STAR_TYPE: &str = "Yellow dwarf";
pub const DEFAULT_STAR_LUMINOSITY: f64 = 1.0;

pub struct PlanetSystemRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

/// Optional star parameter changes
#[derive(Default)]
pub struct StarChanges {
    pub name: Option<String>,
    pub star_type: Option<String>,
    pub luminosity: Option<f64>,
}

/// Filters for the planet system listing
#[derive(Default)]
pub struct SystemListFilter {
    /// Restrict to systems owned by this user
    pub owner_id: Option<i32>,
    /// Statuses to include
    pub statuses: Vec<SystemStatus>,
    /// Inclusive lower bound on `formed_at`
    pub formed_from: Option<NaiveDateTime>,
    /// Exclusive upper bound on `formed_at`
    pub formed_before: Option<NaiveDateTime>,
}

impl<'a, C: ConnectionTrait> PlanetSystemRepository<'a, C> {
    /// Creates a new instance of [`PlanetSystemRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a draft with the default star
    pub async fn create_draft(
        &self,
        user_id: i32,
        created_at: NaiveDateTime,
    ) -> Result<entity::planet_system::Model, DbErr> {
        let system = entity::planet_system::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            status: ActiveValue::Set(SystemStatus::Draft),
            created_at: ActiveValue::Set(created_at),
            formed_at: ActiveValue::Set(None),
            ended_at: ActiveValue::Set(None),
            moderator_id: ActiveValue::Set(None),
            star_name: ActiveValue::Set(DEFAULT_STAR_NAME.to_string()),
            star_type: ActiveValue::Set(DEFAULT_STAR_TYPE.to_string()),
            star_luminosity: ActiveValue::Set(DEFAULT_STAR_LUMINOSITY),
            ..Default::default()
        };

        system.insert(self.db).await
    }

    /// Fetches a system in any status
    pub async fn get(
        &self,
        system_id: i32,
    ) -> Result<Option<entity::planet_system::Model>, DbErr> {
        entity::prelude::PlanetSystem::find_by_id(system_id)
            .one(self.db)
            .await
    }

    /// Fetches a system with an exclusive row lock held until the transaction ends
    ///
    /// Backends without row locking (SQLite) fall back to a plain read.
    pub async fn lock(
        &self,
        system_id: i32,
    ) -> Result<Option<entity::planet_system::Model>, DbErr> {
        entity::prelude::PlanetSystem::find_by_id(system_id)
            .lock_exclusive()
            .one(self.db)
            .await
    }

    pub async fn find_draft(
        &self,
        user_id: i32,
    ) -> Result<Option<entity::planet_system::Model>, DbErr> {
        entity::prelude::PlanetSystem::find()
            .filter(entity::planet_system::Column::UserId.eq(user_id))
            .filter(entity::planet_system::Column::Status.eq(SystemStatus::Draft))
            .one(self.db)
            .await
    }

    /// Lists systems with their owner, ordered by ID
    pub async fn list(
        &self,
        filter: SystemListFilter,
    ) -> Result<
        Vec<(
            entity::planet_system::Model,
            Option<entity::app_user::Model>,
        )>,
        DbErr,
    > {
        let mut select = entity::prelude::PlanetSystem::find()
            .filter(entity::planet_system::Column::Status.is_in(filter.statuses))
            .order_by_asc(entity::planet_system::Column::Id);

        if let Some(owner_id) = filter.owner_id {
            select = select.filter(entity::planet_system::Column::UserId.eq(owner_id));
        }
        if let Some(from) = filter.formed_from {
            select = select.filter(entity::planet_system::Column::FormedAt.gte(from));
        }
        if let Some(before) = filter.formed_before {
            select = select.filter(entity::planet_system::Column::FormedAt.lt(before));
        }

        select
            .find_also_related(entity::app_user::Entity)
            .all(self.db)
            .await
    }

    pub async fn update_star(
        &self,
        system: entity::planet_system::Model,
        changes: StarChanges,
    ) -> Result<entity::planet_system::Model, DbErr> {
        let mut system_am = system.into_active_model();
        if let Some(name) = changes.name {
            system_am.star_name = ActiveValue::Set(name);
        }
        if let Some(star_type) = changes.star_type {
            system_am.star_type = ActiveValue::Set(star_type);
        }
        if let Some(luminosity) = changes.luminosity {
            system_am.star_luminosity = ActiveValue::Set(luminosity);
        }

        system_am.update(self.db).await
    }

    /// Moves a draft to `Formed`
    pub async fn mark_formed(
        &self,
        system: entity::planet_system::Model,
        formed_at: NaiveDateTime,
    ) -> Result<entity::planet_system::Model, DbErr> {
        let mut system_am = system.into_active_model();
        system_am.status = ActiveValue::Set(SystemStatus::Formed);
        system_am.formed_at = ActiveValue::Set(Some(formed_at));

        system_am.update(self.db).await
    }

    /// Records the moderation outcome
    pub async fn mark_finalized(
        &self,
        system: entity::planet_system::Model,
        outcome: SystemStatus,
        moderator_id: i32,
        ended_at: NaiveDateTime,
    ) -> Result<entity::planet_system::Model, DbErr> {
        let mut system_am = system.into_active_model();
        system_am.status = ActiveValue::Set(outcome);
        system_am.moderator_id = ActiveValue::Set(Some(moderator_id));
        system_am.ended_at = ActiveValue::Set(Some(ended_at));

        system_am.update(self.db).await
    }

    pub async fn mark_deleted(
        &self,
        system: entity::planet_system::Model,
    ) -> Result<entity::planet_system::Model, DbErr> {
        let mut system_am = system.into_active_model();
        system_am.status = ActiveValue::Set(SystemStatus::Deleted);

        system_am.update(self.db).await
    }
}
