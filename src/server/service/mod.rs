//! Service layer for business logic.
//!
//! Services validate input, enforce role and ownership rules, and coordinate repositories,
//! opening transactions where an operation touches several rows.

pub mod auth;
pub mod image;
pub mod planet;
pub mod planet_system;
pub mod temperature;
pub mod temperature_request;
pub mod user;
