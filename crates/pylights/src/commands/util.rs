//! Shared helpers for command handlers.

use pylights_core::Controller;

use crate::error::CliError;

/// Check that a light exists in the current snapshot.
pub fn require_light(controller: &Controller, name: &str) -> Result<(), CliError> {
    if controller.snapshot().light(name).is_some() {
        return Ok(());
    }
    Err(not_found("light", name, "lights list"))
}

/// Check that a song exists in the current snapshot.
pub fn require_song(controller: &Controller, title: &str) -> Result<(), CliError> {
    if controller.snapshot().playback.song_by_title(title).is_some() {
        return Ok(());
    }
    Err(not_found("song", title, "songs list"))
}

/// Check that a preset exists in the current snapshot.
pub fn require_preset(controller: &Controller, name: &str) -> Result<(), CliError> {
    if controller.snapshot().preset(name).is_some() {
        return Ok(());
    }
    Err(not_found("preset", name, "presets list"))
}

fn not_found(resource_type: &str, identifier: &str, list_command: &str) -> CliError {
    CliError::NotFound {
        resource_type: resource_type.into(),
        identifier: identifier.into(),
        list_command: list_command.into(),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Print a status line to stderr unless `--quiet`.
pub fn status(message: &str, quiet: bool) {
    if !quiet {
        eprintln!("{message}");
    }
}
