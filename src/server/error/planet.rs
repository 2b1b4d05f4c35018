use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum PlanetError {
    #[error("Planet ID {0} not found")]
    NotFound(i32),
    #[error("Planet title must not be empty")]
    EmptyTitle,
    #[error("Albedo must be between 0 and 1, got {0}")]
    InvalidAlbedo(f64),
    #[error("Invalid image upload: {0}")]
    InvalidUpload(String),
}

impl IntoResponse for PlanetError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Planet not found"),
            Self::EmptyTitle | Self::InvalidAlbedo(_) | Self::InvalidUpload(_) => {
                error_response(StatusCode::BAD_REQUEST, self.to_string())
            }
        }
    }
}
