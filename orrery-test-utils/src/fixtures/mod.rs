//! Database fixture helpers, accessed through [`TestContext`](crate::TestContext).
//!
//! - `user` - application users
//! - `planet` - catalog planets
//! - `system` - planet systems and their member rows

pub mod planet;
pub mod system;
pub mod user;
