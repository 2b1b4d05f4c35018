use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        planet_system::{SetDistanceDto, SystemMemberDto},
    },
    server::{
        error::Error,
        model::{app::AppState, auth::Identity},
        service::temperature_request::TemperatureRequestService,
    },
};

pub static TEMPERATURE_REQUEST_TAG: &str = "temperature-request";

/// Set the orbital distance of a planet in the caller's draft
#[utoipa::path(
    put,
    path = "/api/temperature-req/{system_id}/planet/{planet_id}",
    tag = TEMPERATURE_REQUEST_TAG,
    params(
        ("system_id" = i32, Path, description = "Planet system ID"),
        ("planet_id" = i32, Path, description = "Planet ID")
    ),
    request_body = SetDistanceDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Distance updated", body = SystemMemberDto),
        (status = 400, description = "Distance not positive or system not a draft", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not own the system", body = ErrorDto),
        (status = 404, description = "System missing or planet not a member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_member_distance(
    State(state): State<AppState>,
    identity: Identity,
    Path((system_id, planet_id)): Path<(i32, i32)>,
    Json(input): Json<SetDistanceDto>,
) -> Result<impl IntoResponse, Error> {
    let member = TemperatureRequestService::new(&state.db)
        .set_distance(&identity, system_id, planet_id, input.planet_distance)
        .await?;

    Ok((StatusCode::OK, Json(member)))
}

/// Remove a planet from the caller's draft
#[utoipa::path(
    delete,
    path = "/api/temperature-req/{system_id}/planet/{planet_id}",
    tag = TEMPERATURE_REQUEST_TAG,
    params(
        ("system_id" = i32, Path, description = "Planet system ID"),
        ("planet_id" = i32, Path, description = "Planet ID")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Planet removed from the draft", body = MessageDto),
        (status = 400, description = "System is not a draft", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller does not own the system", body = ErrorDto),
        (status = 404, description = "System missing or planet not a member", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_member(
    State(state): State<AppState>,
    identity: Identity,
    Path((system_id, planet_id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, Error> {
    TemperatureRequestService::new(&state.db)
        .remove_planet(&identity, system_id, planet_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: format!("Planet {} removed from system {}", planet_id, system_id),
        }),
    ))
}
