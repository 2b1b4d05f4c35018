use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ExprTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct PlanetRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

/// Optional field changes for a planet
#[derive(Default)]
pub struct PlanetChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub albedo: Option<f64>,
}

impl<'a, C: ConnectionTrait> PlanetRepository<'a, C> {
    /// Creates a new instance of [`PlanetRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        title: &str,
        description: &str,
        albedo: f64,
    ) -> Result<entity::planet::Model, DbErr> {
        let planet = entity::planet::ActiveModel {
            title: ActiveValue::Set(title.to_string()),
            description: ActiveValue::Set(description.to_string()),
            albedo: ActiveValue::Set(albedo),
            image: ActiveValue::Set(None),
            is_deleted: ActiveValue::Set(false),
            ..Default::default()
        };

        planet.insert(self.db).await
    }

    /// Fetches a planet regardless of its soft-delete flag
    pub async fn get(&self, planet_id: i32) -> Result<Option<entity::planet::Model>, DbErr> {
        entity::prelude::Planet::find_by_id(planet_id)
            .one(self.db)
            .await
    }

    /// Fetches a planet that has not been soft-deleted
    pub async fn get_visible(
        &self,
        planet_id: i32,
    ) -> Result<Option<entity::planet::Model>, DbErr> {
        entity::prelude::Planet::find_by_id(planet_id)
            .filter(entity::planet::Column::IsDeleted.eq(false))
            .one(self.db)
            .await
    }

    /// Lists planets that have not been soft-deleted, ordered by ID
    ///
    /// `query` matches anywhere in the title, ignoring case.
    pub async fn list_visible(
        &self,
        query: Option<&str>,
    ) -> Result<Vec<entity::planet::Model>, DbErr> {
        let mut select = entity::prelude::Planet::find()
            .filter(entity::planet::Column::IsDeleted.eq(false))
            .order_by_asc(entity::planet::Column::Id);

        if let Some(query) = query.map(str::trim).filter(|q| !q.is_empty()) {
            let pattern = format!("%{}%", query.to_lowercase());
            select = select.filter(
                Expr::expr(Func::lower(Expr::col((
                    entity::planet::Entity,
                    entity::planet::Column::Title,
                ))))
                .like(pattern),
            );
        }

        select.all(self.db).await
    }

    pub async fn update(
        &self,
        planet: entity::planet::Model,
        changes: PlanetChanges,
    ) -> Result<entity::planet::Model, DbErr> {
        let mut planet_am = planet.into_active_model();
        if let Some(title) = changes.title {
            planet_am.title = ActiveValue::Set(title);
        }
        if let Some(description) = changes.description {
            planet_am.description = ActiveValue::Set(description);
        }
        if let Some(albedo) = changes.albedo {
            planet_am.albedo = ActiveValue::Set(albedo);
        }

        planet_am.update(self.db).await
    }

    pub async fn set_image(
        &self,
        planet: entity::planet::Model,
        image: Option<String>,
    ) -> Result<entity::planet::Model, DbErr> {
        let mut planet_am = planet.into_active_model();
        planet_am.image = ActiveValue::Set(image);

        planet_am.update(self.db).await
    }

    /// Flags the planet as deleted and clears its image reference
    pub async fn soft_delete(
        &self,
        planet: entity::planet::Model,
    ) -> Result<entity::planet::Model, DbErr> {
        let mut planet_am = planet.into_active_model();
        planet_am.is_deleted = ActiveValue::Set(true);
        planet_am.image = ActiveValue::Set(None);

        planet_am.update(self.db).await
    }
}
