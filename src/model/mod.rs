//! Request and response types shared by the HTTP API.

pub mod api;
pub mod planet;
pub mod planet_system;
pub mod user;
