pub mod convergence;
pub mod machines;
pub mod simulations;
