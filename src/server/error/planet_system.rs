use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use entity::sea_orm_active_enums::SystemStatus;
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum PlanetSystemError {
    #[error("Planet system ID {0} not found")]
    NotFound(i32),
    #[error("No draft planet system exists for user ID {0}")]
    DraftNotFound(i32),
    #[error("Planet system ID {id} must be {expected:?} but is {actual:?}")]
    InvalidStatus {
        id: i32,
        expected: SystemStatus,
        actual: SystemStatus,
    },
    #[error("Planet system ID {0} is an empty draft")]
    EmptyDraft(i32),
    #[error("Planet ID {planet_id} is already part of planet system ID {system_id}")]
    DuplicateMember { planet_id: i32, system_id: i32 },
    #[error("Planet ID {planet_id} is not part of planet system ID {system_id}")]
    MemberNotFound { planet_id: i32, system_id: i32 },
    #[error("distance is required")]
    DistanceRequired,
    #[error("Star luminosity must be a finite non-negative number")]
    InvalidLuminosity,
    #[error("Temperature of planet ID {planet_id} in planet system ID {system_id} is out of range")]
    TemperatureOutOfRange { planet_id: i32, system_id: i32 },
    #[error("Star {0} must not be empty")]
    EmptyStarField(&'static str),
    #[error("Moderation status must be completed or rejected, got {0:?}")]
    InvalidModerationStatus(String),
    #[error("Unknown planet system status {0:?}")]
    InvalidStatusFilter(String),
    #[error("Invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl IntoResponse for PlanetSystemError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Planet system not found"),
            Self::DraftNotFound(_) => {
                error_response(StatusCode::NOT_FOUND, "Draft planet system not found")
            }
            Self::MemberNotFound { .. } => {
                error_response(StatusCode::NOT_FOUND, "Planet is not part of the system")
            }
            Self::InvalidStatus { .. }
            | Self::EmptyDraft(_)
            | Self::DuplicateMember { .. }
            | Self::DistanceRequired
            | Self::InvalidLuminosity
            | Self::TemperatureOutOfRange { .. }
            | Self::EmptyStarField(_)
            | Self::InvalidModerationStatus(_)
            | Self::InvalidStatusFilter(_)
            | Self::InvalidDate(_) => error_response(StatusCode::BAD_REQUEST, self.to_string()),
        }
    }
}
