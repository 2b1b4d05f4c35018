//! Database model type aliases.
//!
//! Shorthands for the SeaORM models generated in the `entity` crate.

/// Registered account with its role and argon2 password hash.
pub type UserModel = entity::app_user::Model;

/// Catalog planet; `is_deleted` marks soft-deleted entries.
pub type PlanetModel = entity::planet::Model;

/// Planet system request owned by a user.
///
/// # Fields (from `entity::planet_system::Model`)
/// - `status` - Lifecycle status, at most one `Draft` per user
/// - `formed_at` - Set when the owner submits the draft
/// - `ended_at` / `moderator_id` - Set on moderation
/// - `star_luminosity` - Zero means unset and forces rejection on moderation
pub type PlanetSystemModel = entity::planet_system::Model;

/// Membership of a planet in a planet system, keyed by (planet_id, planet_system_id).
pub type TemperatureRequestModel = entity::temperature_request::Model;
