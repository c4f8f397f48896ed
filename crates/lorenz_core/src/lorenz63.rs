use crate::{
    config::{ConfigError, Parameters},
    naming::{history_path, RunContext, DEFAULT_OUTPUT_ROOT},
    solvers::ForwardEuler,
    trajectory::Trajectory,
    traits::{Model, State, Steppable},
    vector_field::Lorenz63Field,
};
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const MODEL_NAME: &str = "lorenz63";

/// Upper bound on the states reserved before integrating; longer runs grow
/// the buffer as they go.
const PREALLOCATED_STATES: usize = 1 << 16;

fn reserved_states(step: usize) -> usize {
    step.min(PREALLOCATED_STATES - 1) + 1
}

/// Lorenz-63 model integrated with fixed-step forward Euler.
#[derive(Debug, Clone)]
pub struct Lorenz63 {
    pub params: Parameters,
    output_root: PathBuf,
    history_file: Option<PathBuf>,
}

impl Default for Lorenz63 {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}

impl Lorenz63 {
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            output_root: PathBuf::from(DEFAULT_OUTPUT_ROOT),
            history_file: None,
        }
    }

    /// Replaces the root that context-derived artifact paths are built under.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Explicit trajectory file, honoured only when the run context is `None`.
    pub fn set_history_file(&mut self, path: impl Into<PathBuf>) {
        self.history_file = Some(path.into());
    }

    pub fn history_file(&self) -> Option<&Path> {
        self.history_file.as_deref()
    }

    /// Runs `params.step` Euler steps from `initial` and returns every visited
    /// state, `initial` included.
    pub fn integrate(&self, initial: State) -> Trajectory {
        let field = Lorenz63Field::<f64>::from_parameters(&self.params);
        let mut solver = ForwardEuler::new(3);
        let mut trajectory = Trajectory::with_capacity(reserved_states(self.params.step));
        let mut x = initial;
        let mut t = 0.0;

        trajectory.push(x);
        for _ in 0..self.params.step {
            solver.step(&field, &mut t, &mut x, self.params.dt);
            trajectory.push(x);
        }
        trajectory
    }

    fn persist(&self, trajectory: &Trajectory, run: &RunContext) -> Option<PathBuf> {
        let Some(path) = history_path(
            &self.output_root,
            MODEL_NAME,
            run,
            self.history_file.as_deref(),
        ) else {
            debug!(context = %run.context, "no trajectory path; skipping persistence");
            return None;
        };

        match trajectory.save(&path) {
            Ok(()) => {
                info!(path = ?path, entries = trajectory.len(), "trajectory written");
                Some(path)
            }
            Err(err) => {
                warn!("{err:#}");
                None
            }
        }
    }
}

impl Model for Lorenz63 {
    fn name(&self) -> &str {
        MODEL_NAME
    }

    fn set_option(&mut self, source: &Path) -> std::result::Result<(), ConfigError> {
        match Parameters::load(source) {
            Ok(params) => {
                debug!(
                    params = %serde_json::to_string(&params).unwrap_or_default(),
                    "parameters loaded from {:?}",
                    source
                );
                self.params = params;
                Ok(())
            }
            Err(err) => {
                warn!("{err}");
                Err(err)
            }
        }
    }

    fn predict(
        &mut self,
        state: &mut [f64],
        perturbation: &[f64],
        run: &RunContext,
    ) -> Result<Option<PathBuf>> {
        if state.len() != 3 {
            bail!("State dimension mismatch. Expected 3, got {}.", state.len());
        }
        if perturbation.len() != 3 {
            bail!(
                "Perturbation dimension mismatch. Expected 3, got {}.",
                perturbation.len()
            );
        }

        let initial = [
            state[0] + perturbation[0],
            state[1] + perturbation[1],
            state[2] + perturbation[2],
        ];
        let trajectory = self.integrate(initial);
        let written = self.persist(&trajectory, run);

        if let Some(last) = trajectory.last() {
            state.copy_from_slice(last);
        }
        Ok(written)
    }
}
