//! navmap backend library
//!
//! GraphQL API over a SQLite store for the navmap mapping and navigation
//! application. The binary in `main.rs` wires these modules together; the
//! integration tests drive the schema directly.

pub mod api;
pub mod config;
pub mod db;
pub mod graphql;
pub mod services;

pub use api::AppState;
