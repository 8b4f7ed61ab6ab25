//! Shared building blocks for the simflow service.
//!
//! Nothing in here touches the database or the network: identifier types,
//! the domain error type, environment-config helpers, input validation and
//! the synthetic convergence curve used by the background runner.

pub mod config;
pub mod convergence;
pub mod error;
pub mod types;
pub mod validation;
