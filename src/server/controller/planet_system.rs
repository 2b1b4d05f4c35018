use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        planet_system::{
            DraftSummaryDto, ModerateSystemDto, PlanetSystemDto, SystemListItemDto,
            SystemListParams, UpdateStarDto,
        },
    },
    server::{
        error::Error,
        model::{app::AppState, auth::Identity},
        service::planet_system::PlanetSystemService,
    },
};

pub static PLANET_SYSTEM_TAG: &str = "planet-system";

/// Summary of the caller's draft
///
/// Returns an empty summary with a null `system_id` when the caller has no draft.
#[utoipa::path(
    get,
    path = "/api/planet-system/draft/id",
    tag = PLANET_SYSTEM_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Draft summary", body = DraftSummaryDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a user", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_draft_summary(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse, Error> {
    let summary = PlanetSystemService::new(&state.db)
        .draft_summary(&identity)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

/// List planet systems
///
/// Users see their own systems, moderators and admins see every system. Drafts and deleted
/// systems are never listed.
#[utoipa::path(
    get,
    path = "/api/planet-system/list",
    tag = PLANET_SYSTEM_TAG,
    params(SystemListParams),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Matching systems ordered by ID", body = Vec<SystemListItemDto>),
        (status = 400, description = "Unknown status or malformed date", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_planet_systems(
    State(state): State<AppState>,
    identity: Identity,
    Query(params): Query<SystemListParams>,
) -> Result<impl IntoResponse, Error> {
    let systems = PlanetSystemService::new(&state.db)
        .list(&identity, params)
        .await?;

    Ok((StatusCode::OK, Json(systems)))
}

#[utoipa::path(
    get,
    path = "/api/planet-system/{id}",
    tag = PLANET_SYSTEM_TAG,
    params(("id" = i32, Path, description = "Planet system ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Planet system with its members", body = PlanetSystemDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller neither owns the system nor is staff", body = ErrorDto),
        (status = 404, description = "Planet system not found or deleted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_planet_system(
    State(state): State<AppState>,
    identity: Identity,
    Path(system_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let system = PlanetSystemService::new(&state.db)
        .get(&identity, system_id)
        .await?;

    Ok((StatusCode::OK, Json(system)))
}

/// Edit star parameters of the caller's draft
#[utoipa::path(
    put,
    path = "/api/planet-system/{id}",
    tag = PLANET_SYSTEM_TAG,
    params(("id" = i32, Path, description = "Planet system ID")),
    request_body = UpdateStarDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Star updated", body = PlanetSystemDto),
        (status = 400, description = "Not a draft, blank name or invalid luminosity", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not own the system", body = ErrorDto),
        (status = 404, description = "Planet system not found or deleted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_planet_system(
    State(state): State<AppState>,
    identity: Identity,
    Path(system_id): Path<i32>,
    Json(input): Json<UpdateStarDto>,
) -> Result<impl IntoResponse, Error> {
    let system = PlanetSystemService::new(&state.db)
        .update_star(&identity, system_id, input)
        .await?;

    Ok((StatusCode::OK, Json(system)))
}

/// Submit the caller's draft for moderation
#[utoipa::path(
    put,
    path = "/api/planet-system/{id}/form",
    tag = PLANET_SYSTEM_TAG,
    params(("id" = i32, Path, description = "Planet system ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Planet system formed", body = PlanetSystemDto),
        (status = 400, description = "Not a draft or the draft is empty", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not own the system", body = ErrorDto),
        (status = 404, description = "Planet system not found or deleted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn form_planet_system(
    State(state): State<AppState>,
    identity: Identity,
    Path(system_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let system = PlanetSystemService::new(&state.db)
        .form(&identity, system_id)
        .await?;

    Ok((StatusCode::OK, Json(system)))
}

/// Complete or reject a formed planet system
///
/// Completion computes the equilibrium temperature of every member. Systems with an unset star
/// luminosity or member distance are rejected regardless of the requested outcome.
#[utoipa::path(
    put,
    path = "/api/planet-system/{id}/moder",
    tag = PLANET_SYSTEM_TAG,
    params(("id" = i32, Path, description = "Planet system ID")),
    request_body = ModerateSystemDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Planet system finalized", body = PlanetSystemDto),
        (status = 400, description = "Invalid outcome or system not formed", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator or admin", body = ErrorDto),
        (status = 404, description = "Planet system not found or deleted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn moderate_planet_system(
    State(state): State<AppState>,
    identity: Identity,
    Path(system_id): Path<i32>,
    Json(input): Json<ModerateSystemDto>,
) -> Result<impl IntoResponse, Error> {
    let system = PlanetSystemService::new(&state.db)
        .moderate(&identity, system_id, input)
        .await?;

    Ok((StatusCode::OK, Json(system)))
}

#[utoipa::path(
    delete,
    path = "/api/planet-system/delete",
    tag = PLANET_SYSTEM_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Draft deleted", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a user", body = ErrorDto),
        (status = 404, description = "Caller has no draft", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_draft(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse, Error> {
    PlanetSystemService::new(&state.db)
        .delete_draft(&identity)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Draft deleted".to_string(),
        }),
    ))
}
