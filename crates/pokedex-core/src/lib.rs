//! Core library for the pokedex terminal client.
//!
//! Holds everything that is independent of the UI: configuration, the token
//! store, the HTTP client with its auth retry logic, the profile cache, and
//! the catalog API operations.

pub mod api;
pub mod catalog;
pub mod config;
pub mod session;
