use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        planet::{
            CreatePlanetDto, PlanetDto, PlanetImageUpload, PlanetListDto, PlanetSearchParams,
            UpdatePlanetDto,
        },
        planet_system::DraftMembershipDto,
    },
    server::{
        controller::util::identity::MaybeIdentity,
        error::{planet::PlanetError, Error},
        model::{
            app::AppState,
            auth::{Identity, STAFF_ROLES},
        },
        service::{planet::PlanetService, temperature_request::TemperatureRequestService},
    },
};

pub static PLANET_TAG: &str = "planet";

/// List catalog planets
///
/// When a valid bearer token is presented the response also carries the caller's draft ID and
/// its member count.
#[utoipa::path(
    get,
    path = "/api/planet",
    tag = PLANET_TAG,
    params(PlanetSearchParams),
    responses(
        (status = 200, description = "Visible planets ordered by ID", body = PlanetListDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_planets(
    State(state): State<AppState>,
    MaybeIdentity(caller): MaybeIdentity,
    Query(params): Query<PlanetSearchParams>,
) -> Result<impl IntoResponse, Error> {
    let planets = PlanetService::new(&state.db, state.images.as_ref())
        .list(params.query.as_deref(), caller.as_ref())
        .await?;

    Ok((StatusCode::OK, Json(planets)))
}

#[utoipa::path(
    get,
    path = "/api/planet/{id}",
    tag = PLANET_TAG,
    params(("id" = i32, Path, description = "Planet ID")),
    responses(
        (status = 200, description = "Planet found", body = PlanetDto),
        (status = 404, description = "Planet not found or deleted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_planet(
    State(state): State<AppState>,
    Path(planet_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let planet = PlanetService::new(&state.db, state.images.as_ref())
        .get(planet_id)
        .await?;

    Ok((StatusCode::OK, Json(planet)))
}

#[utoipa::path(
    post,
    path = "/api/planet",
    tag = PLANET_TAG,
    request_body = CreatePlanetDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Planet created", body = PlanetDto),
        (status = 400, description = "Empty title or albedo outside [0, 1]", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator or admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_planet(
    State(state): State<AppState>,
    identity: Identity,
    Json(input): Json<CreatePlanetDto>,
) -> Result<impl IntoResponse, Error> {
    identity.authorize(STAFF_ROLES, None)?;

    let planet = PlanetService::new(&state.db, state.images.as_ref())
        .create(input)
        .await?;

    Ok((StatusCode::CREATED, Json(planet)))
}

#[utoipa::path(
    put,
    path = "/api/planet/{id}",
    tag = PLANET_TAG,
    params(("id" = i32, Path, description = "Planet ID")),
    request_body = UpdatePlanetDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Planet updated", body = PlanetDto),
        (status = 400, description = "Empty title or albedo outside [0, 1]", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator or admin", body = ErrorDto),
        (status = 404, description = "Planet not found or deleted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_planet(
    State(state): State<AppState>,
    identity: Identity,
    Path(planet_id): Path<i32>,
    Json(input): Json<UpdatePlanetDto>,
) -> Result<impl IntoResponse, Error> {
    identity.authorize(STAFF_ROLES, None)?;

    let planet = PlanetService::new(&state.db, state.images.as_ref())
        .update(planet_id, input)
        .await?;

    Ok((StatusCode::OK, Json(planet)))
}

/// Soft-delete a planet
///
/// Systems that already include the planet keep showing it in their history.
#[utoipa::path(
    delete,
    path = "/api/planet/{id}",
    tag = PLANET_TAG,
    params(("id" = i32, Path, description = "Planet ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Planet deleted", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator or admin", body = ErrorDto),
        (status = 404, description = "Planet not found or already deleted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_planet(
    State(state): State<AppState>,
    identity: Identity,
    Path(planet_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    identity.authorize(STAFF_ROLES, None)?;

    PlanetService::new(&state.db, state.images.as_ref())
        .delete(planet_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: format!("Planet {} deleted", planet_id),
        }),
    ))
}

/// Upload or replace a planet image from the multipart field `file`
#[utoipa::path(
    post,
    path = "/api/planet/{id}/image",
    tag = PLANET_TAG,
    params(("id" = i32, Path, description = "Planet ID")),
    request_body(content = PlanetImageUpload, content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Image stored", body = PlanetDto),
        (status = 400, description = "Missing file field or unsupported file type", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a moderator or admin", body = ErrorDto),
        (status = 404, description = "Planet not found or deleted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_planet_image(
    State(state): State<AppState>,
    identity: Identity,
    Path(planet_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    identity.authorize(STAFF_ROLES, None)?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| PlanetError::InvalidUpload(e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| PlanetError::InvalidUpload(e.body_text()))?;

        let planet = PlanetService::new(&state.db, state.images.as_ref())
            .upload_image(planet_id, &file_name, &bytes)
            .await?;

        return Ok((StatusCode::OK, Json(planet)));
    }

    Err(PlanetError::InvalidUpload("multipart field `file` is missing".to_string()).into())
}

/// Add a planet to the caller's draft, creating the draft if needed
#[utoipa::path(
    post,
    path = "/api/planet/add/{planet_id}",
    tag = PLANET_TAG,
    params(("planet_id" = i32, Path, description = "Planet ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Planet added to the draft", body = DraftMembershipDto),
        (status = 400, description = "Planet already in the draft", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Caller is not a user", body = ErrorDto),
        (status = 404, description = "Planet not found or deleted", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_planet_to_draft(
    State(state): State<AppState>,
    identity: Identity,
    Path(planet_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let membership = TemperatureRequestService::new(&state.db)
        .add_planet(&identity, planet_id)
        .await?;

    Ok((StatusCode::OK, Json(membership)))
}
