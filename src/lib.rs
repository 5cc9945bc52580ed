//! The `tasklane` library crate.
//!
//! Contains the domain models, authentication mechanisms, storage layer,
//! routing configuration, and error handling for the Tasklane application.
//! The main binary (`main.rs`) uses it to construct and run the server.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
