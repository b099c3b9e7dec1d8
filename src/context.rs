//! Service context that selects the image generator for this run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::openai::OpenAiGenerator;
use crate::adapters::recording::image_generator::RecordingImageGenerator;
use crate::adapters::replaying::image_generator::ReplayingImageGenerator;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::error::CollageError;
use crate::ports::ImageGenerator;

/// Environment variable naming a cassette to replay instead of calling the service.
pub const REPLAY_ENV: &str = "COLLAGE_REPLAY";

/// Environment variable that turns on cassette recording (`1` or `true`).
pub const RECORD_ENV: &str = "COLLAGE_REC";

/// Bundles the port implementations used by the pipeline.
pub struct ServiceContext {
    /// Image generator port.
    pub generator: Box<dyn ImageGenerator>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Write the cassette to disk and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is still shared or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| "Recording adapter still has references".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        let count = recorder.interaction_count();
        let path = recorder.finish().map_err(|e| format!("Failed to write cassette: {e}"))?;
        tracing::info!(interactions = count, path = %path.display(), "cassette written");
        Ok(path)
    }
}

impl ServiceContext {
    /// Pick live, recording or replaying mode from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a replay cassette cannot be loaded.
    pub fn from_env() -> Result<(Self, Option<RecordingSession>), CollageError> {
        if let Ok(cassette_path) = std::env::var(REPLAY_ENV) {
            tracing::debug!(cassette = %cassette_path, "replaying");
            return Ok((Self::replaying(Path::new(&cassette_path))?, None));
        }
        if std::env::var(RECORD_ENV).is_ok_and(|v| v == "true" || v == "1") {
            tracing::debug!("recording mode enabled");
            let (ctx, session) = Self::recording();
            return Ok((ctx, Some(session)));
        }
        Ok((Self::live(), None))
    }

    /// Create a live context backed by the `OpenAI` images API.
    #[must_use]
    pub fn live() -> Self {
        Self { generator: Box::new(OpenAiGenerator::new()) }
    }

    /// Create a recording context that wraps the live generator with a recorder.
    #[must_use]
    pub fn recording() -> (Self, RecordingSession) {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".collage/cassettes")
            .join(&timestamp)
            .join("image_generator.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-collage"),
            get_commit_hash(),
        )));

        let generator =
            RecordingImageGenerator::new(Self::live().generator, Arc::clone(&recorder));
        (Self { generator: Box::new(generator) }, RecordingSession { recorder })
    }

    /// Create a replaying context from a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, CollageError> {
        let replayer = load_cassette(path)
            .map_err(|e| CollageError::Config(format!("Failed to load cassette: {e}")))?;
        let generator = ReplayingImageGenerator::new(Arc::new(Mutex::new(replayer)));
        Ok(Self { generator: Box::new(generator) })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}
