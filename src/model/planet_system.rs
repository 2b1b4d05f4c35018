use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::planet::PlanetDto;

/// One row of the planet system listing
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SystemListItemDto {
    pub id: i32,
    /// Formation date, or the creation date for systems never formed
    pub date_created: NaiveDate,
    pub status: String,
    pub user_login: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub moder_id: Option<i32>,
    pub star_name: String,
    pub star_type: String,
    pub star_luminosity: f64,
    pub planet_count: u64,
    pub planet_temp_count: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SystemListParams {
    /// Exact status match, any non-draft status when absent
    pub system_status: Option<String>,
    /// Inclusive lower bound on the formation date, `YYYY-MM-DD`
    pub start_date: Option<String>,
    /// Inclusive upper bound on the formation date, `YYYY-MM-DD`
    pub end_date: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SystemMemberDto {
    pub planet: PlanetDto,
    pub planet_distance: i32,
    pub temperature: Option<i32>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PlanetSystemDto {
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    pub date_created: NaiveDateTime,
    pub date_formed: Option<NaiveDateTime>,
    pub date_ended: Option<NaiveDateTime>,
    pub moder_id: Option<i32>,
    pub star_name: String,
    pub star_type: String,
    pub star_luminosity: f64,
    pub planet_count: u64,
    pub planets: Vec<SystemMemberDto>,
}

/// The caller's draft, or an empty summary when no draft exists
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DraftSummaryDto {
    pub system_id: Option<i32>,
    pub planet_count: u64,
    pub star_name: String,
    pub star_type: String,
    pub star_luminosity: f64,
    pub planets: Vec<SystemMemberDto>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdateStarDto {
    pub star_name: Option<String>,
    pub star_type: Option<String>,
    pub star_luminosity: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ModerateSystemDto {
    /// Either `completed` or `rejected`
    pub status: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SetDistanceDto {
    pub planet_distance: i32,
}

/// Returned after a planet is added to the caller's draft
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DraftMembershipDto {
    pub system_id: i32,
    pub planet_count: u64,
}
