//! Builds a cassette from live interactions and writes it as YAML.

use std::path::PathBuf;

use chrono::Utc;
use tracing::debug;

use super::format::{Cassette, Interaction};

/// Collects interactions in call order until [`CassetteRecorder::finish`] is called.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    cassette: Cassette,
}

impl CassetteRecorder {
    /// Start an empty session that will be written to `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        let cassette = Cassette {
            name: name.into(),
            recorded_at: Utc::now(),
            commit: commit.into(),
            interactions: Vec::new(),
        };
        Self { path: path.into(), cassette }
    }

    /// Append an interaction; its `seq` is its position in the session.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.cassette.interactions.len() as u64;
        let (port, method) = (port.into(), method.into());
        debug!(seq, %port, %method, "interaction recorded");
        self.cassette.interactions.push(Interaction { seq, port, method, input, output });
    }

    /// Number of interactions recorded so far.
    #[must_use]
    pub fn interaction_count(&self) -> usize {
        self.cassette.interactions.len()
    }

    /// Serialize the session to YAML at the recorder's path.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be produced or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let yaml = serde_yaml::to_string(&self.cassette).map_err(std::io::Error::other)?;
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}
