pub use super::app_user::Entity as AppUser;
pub use super::planet::Entity as Planet;
pub use super::planet_system::Entity as PlanetSystem;
pub use super::temperature_request::Entity as TemperatureRequest;
