use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, model::PlanetModel, TestContext};

impl TestContext {
    pub fn planet<'a>(&'a self) -> PlanetFixtures<'a> {
        PlanetFixtures { setup: self }
    }
}

pub struct PlanetFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> PlanetFixtures<'a> {
    pub async fn insert_planet(&self, title: &str, albedo: f64) -> Result<PlanetModel, TestError> {
        self.insert(title, albedo, false).await
    }

    pub async fn insert_deleted_planet(
        &self,
        title: &str,
        albedo: f64,
    ) -> Result<PlanetModel, TestError> {
        self.insert(title, albedo, true).await
    }

    async fn insert(
        &self,
        title: &str,
        albedo: f64,
        is_deleted: bool,
    ) -> Result<PlanetModel, TestError> {
        Ok(
            entity::prelude::Planet::insert(entity::planet::ActiveModel {
                title: ActiveValue::Set(title.to_string()),
                description: ActiveValue::Set(format!("{} description", title)),
                albedo: ActiveValue::Set(albedo),
                image: ActiveValue::Set(None),
                is_deleted: ActiveValue::Set(is_deleted),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
