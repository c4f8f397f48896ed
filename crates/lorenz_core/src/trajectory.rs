use crate::traits::State;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Chronological record of the states visited by one integration run,
/// starting with the initial state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trajectory {
    states: Vec<State>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            states: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, state: State) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn first(&self) -> Option<&State> {
        self.states.first()
    }

    pub fn last(&self) -> Option<&State> {
        self.states.last()
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Writes one `x y z` line per state. No header or trailer.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for [x, y, z] in &self.states {
            writeln!(out, "{} {} {}", x, y, z)?;
        }
        Ok(())
    }

    /// Writes the trajectory to `path`, creating missing parent directories.
    ///
    /// The file is truncated first and is not written atomically; an
    /// interrupted write leaves a partial file behind.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory {:?}", parent))?;
        }

        let file = File::create(path).with_context(|| format!("{:?} could not open", path))?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer)
            .and_then(|_| writer.flush())
            .with_context(|| format!("Failed to write trajectory to {:?}", path))?;
        Ok(())
    }
}
