//! On-disk cassette layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: every interaction with every port, in call order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Session name.
    pub name: String,
    /// When the session was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from.
    pub commit: String,
    /// Recorded interactions.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position within the session.
    pub seq: u64,
    /// Port name, e.g. `"image_generator"`.
    pub port: String,
    /// Method name, e.g. `"generate"`.
    pub method: String,
    /// Serialized call input.
    pub input: serde_json::Value,
    /// `{"Ok": ...}` or `{"Err": {"kind": ..., "message": ...}}`.
    pub output: serde_json::Value,
}
