use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PlanetDto {
    pub id: i32,
    pub planet_title: String,
    pub description: String,
    pub albedo: f64,
    pub image: Option<String>,
}

/// Catalog listing, with the caller's draft counters when a valid token was presented
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PlanetListDto {
    pub planets: Vec<PlanetDto>,
    pub system_id: Option<i32>,
    pub planet_count: u64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PlanetSearchParams {
    /// Case-insensitive title fragment
    pub query: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct CreatePlanetDto {
    pub planet_title: String,
    pub description: String,
    pub albedo: f64,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UpdatePlanetDto {
    pub planet_title: Option<String>,
    pub description: Option<String>,
    pub albedo: Option<f64>,
}

/// Multipart body for planet image uploads
#[derive(utoipa::ToSchema)]
pub struct PlanetImageUpload {
    #[schema(format = Binary)]
    pub file: String,
}
