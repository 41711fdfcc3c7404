//! Command dispatch: bridges CLI args -> client calls -> output formatting.

pub mod camera;
pub mod config_cmd;
pub mod media_url;
pub mod util;

use motioneye_api::MotionEyeClient;

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;
use crate::output;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &MotionEyeClient,
    format: OutputFormat,
) -> Result<(), CliError> {
    let doc = match cmd {
        Command::Login => client.login().await?,
        Command::Manifest => client.get_manifest().await?,
        Command::ServerConfig => client.get_server_config().await?,
        Command::Cameras => client.get_cameras().await?,
        Command::Camera(args) => camera::handle(client, args).await?,
        Command::Action(args) => client.action(args.id, &args.action).await?,
        Command::Movies(args) => client.get_movies(args.id, args.prefix.as_deref()).await?,
        Command::Images(args) => client.get_images(args.id, args.prefix.as_deref()).await?,

        // URLs are printed bare so they can be piped into a player
        Command::Url(args) => {
            let url = media_url::handle(client, args).await?;
            output::print_output(&url);
            return Ok(());
        }

        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    };

    output::print_output(&output::render(format, &doc)?);
    Ok(())
}
