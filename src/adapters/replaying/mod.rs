//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_generator;

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::{CollageError, ErrorKind};

#[derive(Deserialize)]
struct RecordedError {
    kind: ErrorKind,
    message: String,
}

/// Take the next recorded output for `port` and `method`.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, CollageError> {
    let mut guard = replayer
        .lock()
        .map_err(|e| CollageError::UnclassifiedFailure(format!("Replayer lock poisoned: {e}")))?;
    guard
        .next_interaction(port, method)
        .map(|interaction| interaction.output)
        .map_err(CollageError::UnclassifiedFailure)
}

/// Turn a recorded output back into a `Result`.
///
/// Recorded errors keep their kind; a bare error string replays as
/// [`CollageError::UnclassifiedFailure`].
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, CollageError> {
    if let Some(err_val) = output.get("Err") {
        return Err(match serde_json::from_value::<RecordedError>(err_val.clone()) {
            Ok(recorded) => CollageError::from_recorded(recorded.kind, recorded.message),
            Err(_) => CollageError::UnclassifiedFailure(
                err_val.as_str().unwrap_or("replayed error").to_string(),
            ),
        });
    }
    let value = output.get("Ok").cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| {
        CollageError::UnclassifiedFailure(format!("Malformed cassette output: {e}"))
    })
}
