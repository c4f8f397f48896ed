//! The `lorenz_core` crate advances the Lorenz-63 system with fixed-step forward
//! Euler and records each run's trajectory to disk.
//!
//! Key components:
//! - **Traits**: `Scalar`, `DynamicalSystem` (vector fields), `Steppable` (solvers)
//!   and `Model`, the surface a host driver calls (`set_option` / `predict`).
//! - **Vector field**: the Lorenz-63 right-hand side.
//! - **Solvers**: the forward Euler stepper.
//! - **Naming**: output paths derived from the run context, id and time tag.
//! - **Config**: JSON parameter loading with explicit validation.
pub mod config;
pub mod lorenz63;
pub mod naming;
pub mod solvers;
pub mod trajectory;
pub mod traits;
pub mod vector_field;

pub use config::{ConfigError, Parameters};
pub use lorenz63::{Lorenz63, MODEL_NAME};
pub use naming::{ExecutionContext, RunContext};
pub use traits::{Model, State};
