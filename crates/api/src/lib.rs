//! Simflow API server library.
//!
//! Exposes the building blocks (config, state, error handling, service,
//! routes, router assembly) so integration tests and the binary entrypoint
//! share one definition of the application.

pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
