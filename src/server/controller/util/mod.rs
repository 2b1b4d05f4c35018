//! Utilities shared by controllers.
//!
//! - `identity` - bearer token extractors for mandatory and optional authentication

pub mod identity;
