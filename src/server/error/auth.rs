use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authorization header is missing or not a bearer token")]
    MissingToken,
    #[error("Bearer token failed verification: {0}")]
    InvalidToken(String),
    #[error("Bearer token has been revoked")]
    TokenRevoked,
    #[error("Caller is not allowed to perform this operation")]
    Forbidden,
    #[error("Login or password is incorrect")]
    InvalidCredentials,
    #[error("Login and password are required")]
    MissingCredentials,
    #[error("Login {0:?} is already taken")]
    LoginTaken(String),
    #[error("Unknown role {0:?}")]
    InvalidRole(String),
    #[error("User ID {0} not found")]
    UserNotFound(i32),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::TokenRevoked => {
                error_response(StatusCode::UNAUTHORIZED, "Authorization required")
            }
            Self::InvalidCredentials => {
                error_response(StatusCode::UNAUTHORIZED, "Invalid login or password")
            }
            Self::Forbidden => error_response(StatusCode::FORBIDDEN, "Access denied"),
            Self::MissingCredentials | Self::LoginTaken(_) | Self::InvalidRole(_) => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
            Self::UserNotFound(_) => error_response(StatusCode::NOT_FOUND, "User not found"),
        }
    }
}
