//! Server application core modules.
//!
//! This module contains all server-side functionality for the Orrery application: HTTP
//! routing, bearer token authentication, database access, the planet system lifecycle and
//! equilibrium temperature calculation, and planet image storage.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
