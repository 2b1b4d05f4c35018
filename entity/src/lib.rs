pub mod prelude;

pub mod app_user;
pub mod planet;
pub mod planet_system;
pub mod sea_orm_active_enums;
pub mod temperature_request;
