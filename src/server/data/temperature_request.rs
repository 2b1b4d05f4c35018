use std::collections::HashMap;

use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, ExprTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

pub struct TemperatureRequestRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TemperatureRequestRepository<'a, C> {
    /// Creates a new instance of [`TemperatureRequestRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Adds a planet to a system with an unset distance
    pub async fn add(
        &self,
        planet_id: i32,
        planet_system_id: i32,
    ) -> Result<entity::temperature_request::Model, DbErr> {
        let member = entity::temperature_request::ActiveModel {
            planet_id: ActiveValue::Set(planet_id),
            planet_system_id: ActiveValue::Set(planet_system_id),
            distance: ActiveValue::Set(0),
            temperature: ActiveValue::Set(None),
        };

        member.insert(self.db).await
    }

    pub async fn get(
        &self,
        planet_system_id: i32,
        planet_id: i32,
    ) -> Result<Option<entity::temperature_request::Model>, DbErr> {
        entity::prelude::TemperatureRequest::find_by_id((planet_id, planet_system_id))
            .one(self.db)
            .await
    }

    /// Removes a member row
    ///
    /// Returns OK regardless of the row existing, check [`DeleteResult::rows_affected`].
    pub async fn remove(
        &self,
        planet_system_id: i32,
        planet_id: i32,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::TemperatureRequest::delete_by_id((planet_id, planet_system_id))
            .exec(self.db)
            .await
    }

    pub async fn set_distance(
        &self,
        member: entity::temperature_request::Model,
        distance: i32,
    ) -> Result<entity::temperature_request::Model, DbErr> {
        let mut member_am = member.into_active_model();
        member_am.distance = ActiveValue::Set(distance);

        member_am.update(self.db).await
    }

    pub async fn set_temperature(
        &self,
        member: entity::temperature_request::Model,
        temperature: i32,
    ) -> Result<entity::temperature_request::Model, DbErr> {
        let mut member_am = member.into_active_model();
        member_am.temperature = ActiveValue::Set(Some(temperature));

        member_am.update(self.db).await
    }

    pub async fn count_by_system(&self, planet_system_id: i32) -> Result<u64, DbErr> {
        entity::prelude::TemperatureRequest::find()
            .filter(entity::temperature_request::Column::PlanetSystemId.eq(planet_system_id))
            .count(self.db)
            .await
    }

    /// Member counts keyed by system ID; systems without members are absent
    pub async fn count_by_systems(
        &self,
        planet_system_ids: &[i32],
    ) -> Result<HashMap<i32, u64>, DbErr> {
        if planet_system_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, i64)> = entity::prelude::TemperatureRequest::find()
            .select_only()
            .column(entity::temperature_request::Column::PlanetSystemId)
            .column_as(
                Expr::col(entity::temperature_request::Column::PlanetId).count(),
                "member_count",
            )
            .filter(
                entity::temperature_request::Column::PlanetSystemId
                    .is_in(planet_system_ids.iter().copied()),
            )
            .group_by(entity::temperature_request::Column::PlanetSystemId)
            .into_tuple()
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(system_id, count)| (system_id, Ord::max(count, 0) as u64))
            .collect())
    }

    /// Member rows of a system with their planets, soft-deleted planets included
    pub async fn members_with_planets(
        &self,
        planet_system_id: i32,
    ) -> Result<
        Vec<(
            entity::temperature_request::Model,
            entity::planet::Model,
        )>,
        DbErr,
    > {
        let rows = entity::prelude::TemperatureRequest::find()
            .filter(entity::temperature_request::Column::PlanetSystemId.eq(planet_system_id))
            .order_by_asc(entity::temperature_request::Column::PlanetId)
            .find_also_related(entity::planet::Entity)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(member, planet)| planet.map(|planet| (member, planet)))
            .collect())
    }
}
