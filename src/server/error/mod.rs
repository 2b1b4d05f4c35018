//! Error types for the Orrery server application.
//!
//! Each domain has its own error enum (authentication, configuration, catalog, planet systems).
//! All errors implement `IntoResponse` for Axum HTTP responses and use `thiserror` for
//! ergonomic error definitions.

pub mod auth;
pub mod config;
pub mod planet;
pub mod planet_system;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, planet::PlanetError,
        planet_system::PlanetSystemError,
    },
};

/// Main error type for the Orrery server application.
///
/// Aggregates all domain-specific error types and external library errors into a single type.
/// `#[from]` conversions allow `?` on any of them; the `IntoResponse` implementation maps each
/// to an HTTP response for API consumers.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (tokens, credentials, role and ownership checks)
/// - Catalog errors (planet lookup and validation)
/// - Planet system errors (lifecycle state machine, membership, listing filters)
/// - External library errors (database, Redis, IO, JWT encoding)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization error.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Planet catalog error.
    #[error(transparent)]
    PlanetError(#[from] PlanetError),
    /// Planet system lifecycle error.
    #[error(transparent)]
    PlanetSystemError(#[from] PlanetSystemError),
    /// Internal error indicating a bug or an unexpected state.
    #[error("Internal error: {0}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Redis token blacklist error (connection, command execution).
    #[error(transparent)]
    RedisError(#[from] fred::error::Error),
    /// Filesystem error from image storage.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    /// Token encoding error.
    #[error(transparent)]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

/// Converts application errors into HTTP responses.
///
/// Domain errors carry their own response mapping; everything else is treated as an internal
/// server error (500) and logged.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::PlanetError(err) => err.into_response(),
            Self::PlanetSystemError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON error response with the provided status and message.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the client
/// to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
