//! Data access layer repositories.
//!
//! Repositories wrap SeaORM queries per table and are generic over [`sea_orm::ConnectionTrait`]
//! so the same code runs on a pooled connection or inside a transaction.

pub mod planet;
pub mod planet_system;
pub mod temperature_request;
pub mod user;
