//! Shared helpers for command handlers.

use std::path::Path;

use serde_json::Value;

use motioneye_api::{CameraConfig, MotionEyeClient};

use crate::error::CliError;

/// Read a JSON object from disk for `camera set`.
pub fn read_camera_config(path: &Path) -> Result<CameraConfig, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| CliError::Validation {
        field: "from-file".into(),
        reason: format!("invalid JSON: {e}"),
    })?;
    into_camera_config(value, "from-file")
}

/// Fetch a camera's configuration as a key/value map.
pub async fn fetch_camera_config(
    client: &MotionEyeClient,
    camera_id: u32,
) -> Result<CameraConfig, CliError> {
    let value = client.get_camera(camera_id).await?;
    into_camera_config(value, "camera config")
}

fn into_camera_config(value: Value, field: &str) -> Result<CameraConfig, CliError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CliError::Validation {
            field: field.into(),
            reason: format!("expected a JSON object, got {other}"),
        }),
    }
}
