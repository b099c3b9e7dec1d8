//! Recording adapters that capture interactions to cassettes.

pub mod image_generator;

use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

use crate::cassette::recorder::CassetteRecorder;
use crate::error::CollageError;

/// Record a call outcome as `{"Ok": value}` or `{"Err": {"kind", "message"}}`.
///
/// Recording is best effort: a value that cannot be serialized is logged and skipped.
pub(crate) fn record_result<T, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, CollageError>,
) where
    T: Serialize,
    I: Serialize,
{
    let input_json = match serde_json::to_value(input) {
        Ok(v) => v,
        Err(e) => {
            warn!(port, method, error = %e, "skipping recording: input not serializable");
            return;
        }
    };

    let output_json = match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(inner) => serde_json::json!({ "Ok": inner }),
            Err(e) => {
                warn!(port, method, error = %e, "skipping recording: output not serializable");
                return;
            }
        },
        Err(e) => serde_json::json!({ "Err": { "kind": e.kind(), "message": e.detail() } }),
    };

    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input_json, output_json),
        Err(e) => warn!(port, method, error = %e, "skipping recording: recorder lock poisoned"),
    }
}
