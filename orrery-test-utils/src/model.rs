//! Database model type aliases for test utilities.
//!
//! These aliases match those in the main orrery crate so fixtures and assertions read the same
//! on both sides.

pub type UserModel = entity::app_user::Model;

pub type PlanetModel = entity::planet::Model;

pub type PlanetSystemModel = entity::planet_system::Model;

pub type TemperatureRequestModel = entity::temperature_request::Model;
