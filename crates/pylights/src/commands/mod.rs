//! Command dispatch: bridges CLI args -> controller calls -> output formatting.

pub mod config_cmd;
pub mod developer;
pub mod info;
pub mod lights;
pub mod presets;
pub mod remap;
pub mod songs;
pub mod util;
pub mod watch;

use pylights_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a device-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Info => info::handle(controller, global),
        Command::Songs(args) => songs::handle(controller, args, global).await,
        Command::Lights(args) => lights::handle(controller, args, global).await,
        Command::Presets(args) => presets::handle(controller, args, global).await,
        Command::Remap(args) => remap::handle(controller, args, global).await,
        Command::Developer(args) => developer::handle(controller, args, global).await,
        Command::Watch => watch::handle(controller, global).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "local command routed to the device dispatcher".into(),
        )),
    }
}
