//! Camera command handlers.

use serde_json::Value;

use motioneye_api::MotionEyeClient;

use crate::cli::{CameraArgs, CameraCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(client: &MotionEyeClient, args: CameraArgs) -> Result<Value, CliError> {
    match args.command {
        CameraCommand::Get { id } => Ok(client.get_camera(id).await?),

        CameraCommand::Set { id, from_file } => {
            let config = util::read_camera_config(&from_file)?;
            tracing::info!(camera_id = id, keys = config.len(), "replacing camera config");
            Ok(client.set_camera(id, &config).await?)
        }
    }
}
