//! HTTP controller endpoints for the Orrery web API.
//!
//! Axum handlers for the planet catalog, planet systems, draft membership and user accounts.
//! Controllers extract the caller identity and inputs, delegate to services, and return JSON
//! responses. Every handler carries a utoipa path annotation for the OpenAPI document.

pub mod planet;
pub mod planet_system;
pub mod temperature_request;
pub mod user;
pub mod util;
