use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        user::{LoginDto, RegisterUserDto, TokenDto, UpdateProfileDto, UserDto},
    },
    server::{
        controller::util::identity::MaybeIdentity,
        error::Error,
        model::{app::AppState, auth::Identity},
        service::{auth::AuthService, user::UserService},
    },
};

pub static USER_TAG: &str = "user";

/// Register a new account
///
/// Anonymous registration always creates a `user`. Moderator and admin accounts can only be
/// created with an admin token.
#[utoipa::path(
    post,
    path = "/api/user/register",
    tag = USER_TAG,
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Missing credentials, unknown role or login taken", body = ErrorDto),
        (status = 403, description = "Privileged role requested without an admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    MaybeIdentity(caller): MaybeIdentity,
    Json(input): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db)
        .register(caller.as_ref(), input)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post,
    path = "/api/user/login",
    tag = USER_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Bearer token issued", body = TokenDto),
        (status = 400, description = "Missing login", body = ErrorDto),
        (status = 401, description = "Invalid login or password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let token = UserService::new(&state.db)
        .login(input, &state.tokens)
        .await?;

    Ok((StatusCode::OK, Json(token)))
}

/// Revoke the presented bearer token for the rest of its lifetime
#[utoipa::path(
    post,
    path = "/api/user/logout",
    tag = USER_TAG,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token revoked", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<impl IntoResponse, Error> {
    AuthService::new(&state.tokens, state.blacklist.as_ref())
        .revoke(&identity)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Logged out".to_string(),
        }),
    ))
}

/// Get a user profile
///
/// Users can only read their own profile; moderators and admins can read any.
#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User profile", body = UserDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Profile belongs to another user", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    identity: Identity,
    Path(user_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db)
        .get_profile(&identity, user_id)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}

/// Change the caller's login and/or password
#[utoipa::path(
    put,
    path = "/api/user/me",
    tag = USER_TAG,
    request_body = UpdateProfileDto,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile updated", body = UserDto),
        (status = 400, description = "Blank value or login taken", body = ErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_me(
    State(state): State<AppState>,
    identity: Identity,
    Json(input): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db)
        .update_profile(&identity, input)
        .await?;

    Ok((StatusCode::OK, Json(user)))
}
