use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Largest accepted `step`, the range of the host's 32-bit step counter.
pub const MAX_STEP: usize = i32::MAX as usize;

/// Coefficients and integration settings for one model instance.
///
/// `Default` is the reference configuration: sigma 10, rho 32, beta 8/3,
/// dt 0.01 and 10000 steps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Parameters {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
    /// Fixed time step.
    pub dt: f64,
    /// Number of integration steps per `predict` call.
    pub step: usize,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 32.0,
            beta: 8.0 / 3.0,
            dt: 0.01,
            step: 10_000,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read parameter file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse parameter file {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("parameters must be a JSON object")]
    NotAnObject,
    #[error("missing parameter `{0}`")]
    MissingField(&'static str),
    #[error("parameter `{field}` must be {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },
}

impl Parameters {
    /// Reads and validates a JSON parameter file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&value)
    }

    /// Builds parameters from a JSON object holding `sigma`, `rho`, `beta`,
    /// `dt` and `step`. Other keys are ignored.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let object = value.as_object().ok_or(ConfigError::NotAnObject)?;
        Ok(Self {
            sigma: real(object, "sigma")?,
            rho: real(object, "rho")?,
            beta: real(object, "beta")?,
            dt: real(object, "dt")?,
            step: count(object, "step")?,
        })
    }
}

fn field<'a>(
    object: &'a Map<String, Value>,
    name: &'static str,
) -> Result<&'a Value, ConfigError> {
    object.get(name).ok_or(ConfigError::MissingField(name))
}

fn real(object: &Map<String, Value>, name: &'static str) -> Result<f64, ConfigError> {
    field(object, name)?
        .as_f64()
        .ok_or(ConfigError::InvalidField {
            field: name,
            expected: "a number",
        })
}

fn count(object: &Map<String, Value>, name: &'static str) -> Result<usize, ConfigError> {
    field(object, name)?
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .filter(|&n| n <= MAX_STEP)
        .ok_or(ConfigError::InvalidField {
            field: name,
            expected: "a non-negative integer no larger than 2147483647",
        })
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "sigma {}", self.sigma)?;
        writeln!(f, "rho {}", self.rho)?;
        writeln!(f, "beta {}", self.beta)?;
        writeln!(f, "dt {}", self.dt)?;
        write!(f, "step {}", self.step)
    }
}
