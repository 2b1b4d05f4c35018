//! Server application models and type definitions.
//!
//! Application state shared by handlers, caller identity and token claims, and database model
//! type aliases.

pub mod app;
pub mod auth;
pub mod db;
