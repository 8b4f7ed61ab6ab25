//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod convergence_repo;
pub mod machine_repo;
pub mod simulation_repo;

pub use convergence_repo::ConvergenceRepo;
pub use machine_repo::MachineRepo;
pub use simulation_repo::SimulationRepo;
