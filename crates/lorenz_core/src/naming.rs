//! Output artifact naming.
//!
//! Paths are derived from the run context supplied by the host for each call;
//! nothing here is cached between calls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default root directory for derived artifact paths.
pub const DEFAULT_OUTPUT_ROOT: &str = "output";

/// File name of every persisted trajectory.
pub const TRAJECTORY_FILE: &str = "trajectory.dat";

/// What the host is running the model for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionContext {
    #[default]
    None,
    /// Ensemble member forecast.
    Predict,
    /// Synthetic observation generation.
    Obsgen,
}

impl FromStr for ExecutionContext {
    type Err = std::convert::Infallible;

    /// Unrecognized names fall back to `None`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "predict" => ExecutionContext::Predict,
            "obsgen" => ExecutionContext::Obsgen,
            _ => ExecutionContext::None,
        })
    }
}

impl fmt::Display for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExecutionContext::None => "none",
            ExecutionContext::Predict => "predict",
            ExecutionContext::Obsgen => "obsgen",
        };
        f.write_str(label)
    }
}

/// Per-call identity supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub context: ExecutionContext,
    /// Ensemble member id.
    pub id: u32,
    /// Simulation time tag.
    pub sys_time: u64,
}

impl RunContext {
    pub fn new(context: ExecutionContext, id: u32, sys_time: u64) -> Self {
        Self {
            context,
            id,
            sys_time,
        }
    }
}

/// Resolves where a trajectory should be written.
///
/// | context | path |
/// |---|---|
/// | `Predict` | `<root>/state/<name>_<id:04>_<sys_time:06>/trajectory.dat` |
/// | `Obsgen` | `<root>/obs/<name>_obs_<sys_time:06>/trajectory.dat` |
/// | `None` | `preset` when non-empty |
///
/// `None` means persistence is skipped.
pub fn history_path(
    root: &Path,
    name: &str,
    run: &RunContext,
    preset: Option<&Path>,
) -> Option<PathBuf> {
    match run.context {
        ExecutionContext::Predict => {
            let dir = format!("{}_{:04}_{:06}", name, run.id, run.sys_time);
            Some(root.join("state").join(dir).join(TRAJECTORY_FILE))
        }
        ExecutionContext::Obsgen => {
            let dir = format!("{}_obs_{:06}", name, run.sys_time);
            Some(root.join("obs").join(dir).join(TRAJECTORY_FILE))
        }
        ExecutionContext::None => preset
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf),
    }
}
