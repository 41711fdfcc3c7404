//! `url` subcommands: stream, snapshot, movie and image links.

use motioneye_api::MotionEyeClient;

use crate::cli::{UrlArgs, UrlCommand};
use crate::error::CliError;

use super::util;

pub async fn handle(client: &MotionEyeClient, args: UrlArgs) -> Result<String, CliError> {
    match args.command {
        UrlCommand::Stream { id } => {
            let camera = util::fetch_camera_config(client, id).await?;
            client
                .get_camera_stream_url(&camera)
                .ok_or(CliError::NotStreaming { camera_id: id })
        }

        UrlCommand::Snapshot { id } => {
            let camera = util::fetch_camera_config(client, id).await?;
            client
                .get_camera_snapshot_url(&camera)
                .ok_or(CliError::NotStreaming { camera_id: id })
        }

        UrlCommand::Movie(media) => Ok(client.get_movie_url(media.id, &media.path, media.preview)?),

        UrlCommand::Image(media) => Ok(client.get_image_url(media.id, &media.path, media.preview)?),
    }
}
