use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::SystemStatus;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{
    error::TestError,
    model::{PlanetSystemModel, TemperatureRequestModel},
    TestContext,
};

impl TestContext {
    pub fn system<'a>(&'a self) -> SystemFixtures<'a> {
        SystemFixtures { setup: self }
    }
}

pub struct SystemFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> SystemFixtures<'a> {
    /// Insert a system owned by `user_id` with a Sun-like star.
    ///
    /// Systems past the draft stage get a `formed_at` one minute after creation.
    pub async fn insert_system(
        &self,
        user_id: i32,
        status: SystemStatus,
    ) -> Result<PlanetSystemModel, TestError> {
        self.insert_system_with_luminosity(user_id, status, 1.0)
            .await
    }

    pub async fn insert_system_with_luminosity(
        &self,
        user_id: i32,
        status: SystemStatus,
        star_luminosity: f64,
    ) -> Result<PlanetSystemModel, TestError> {
        let created_at = Utc::now().naive_utc() - Duration::minutes(1);
        let formed_at = match status {
            SystemStatus::Draft => None,
            _ => Some(created_at + Duration::minutes(1)),
        };

        Ok(
            entity::prelude::PlanetSystem::insert(entity::planet_system::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                status: ActiveValue::Set(status),
                created_at: ActiveValue::Set(created_at),
                formed_at: ActiveValue::Set(formed_at),
                ended_at: ActiveValue::Set(None),
                moderator_id: ActiveValue::Set(None),
                star_name: ActiveValue::Set("Sun".to_string()),
                star_type: ActiveValue::Set("Yellow dwarf".to_string()),
                star_luminosity: ActiveValue::Set(star_luminosity),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_member(
        &self,
        planet_id: i32,
        planet_system_id: i32,
        distance: i32,
    ) -> Result<TemperatureRequestModel, TestError> {
        Ok(entity::prelude::TemperatureRequest::insert(
            entity::temperature_request::ActiveModel {
                planet_id: ActiveValue::Set(planet_id),
                planet_system_id: ActiveValue::Set(planet_system_id),
                distance: ActiveValue::Set(distance),
                temperature: ActiveValue::Set(None),
            },
        )
        .exec_with_returning(&self.setup.db)
        .await?)
    }
}
