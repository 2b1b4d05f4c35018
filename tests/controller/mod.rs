//! Tests for HTTP controller endpoints.
//!
//! Handlers are called directly with extractor values and their responses checked for status
//! codes and payloads.

mod planet;
mod planet_system;
mod temperature_request;
mod user;

use axum::{
    body::to_bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use entity::sea_orm_active_enums::{Role, SystemStatus};
use orrery_test_utils::prelude::*;
use serde::de::DeserializeOwned;

use crate::util::{identity, TestContextExt};

/// Reads a JSON response body
async fn json_body<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");

    serde_json::from_slice(&bytes).expect("Response body is not the expected JSON")
}
