use crate::config::ConfigError;
use crate::naming::RunContext;
use anyhow::Result;
use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// A trait for types that can be used as scalars in the vector field and solvers.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A point in the three-dimensional phase space, ordered `(x, y, z)`.
pub type State<T = f64> = [T; 3];

/// A continuous-time system `dx/dt = f(t, x)`.
pub trait DynamicalSystem<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the vector field at `x` and writes the derivative into `out`.
    /// Autonomous systems ignore `t`.
    fn apply(&self, t: T, x: &[T], out: &mut [T]);
}

/// A fixed-step solver that advances a system in place.
pub trait Steppable<T: Scalar> {
    /// Advances `state` by one step of size `dt` and moves `t` to `t + dt`.
    fn step(&mut self, system: &impl DynamicalSystem<T>, t: &mut T, state: &mut [T], dt: T);
}

/// The surface a host driver uses to configure and run a model.
///
/// Each ensemble member owns its own instance; nothing here is shared between
/// instances, so no synchronization is involved.
pub trait Model {
    /// Name used when deriving output artifact paths.
    fn name(&self) -> &str;

    /// Loads the model parameters from `source`.
    ///
    /// On failure the current parameters are left untouched and the caller
    /// decides whether to carry on with them.
    fn set_option(&mut self, source: &Path) -> std::result::Result<(), ConfigError>;

    /// Advances `state + perturbation` and writes the final state back into `state`.
    ///
    /// Returns the path the trajectory was written to, or `None` when
    /// persistence was skipped.
    fn predict(
        &mut self,
        state: &mut [f64],
        perturbation: &[f64],
        run: &RunContext,
    ) -> Result<Option<PathBuf>>;
}
