//! Relay remap workflow handlers.
//!
//! The device switches on one unnamed light at a time. `start` begins
//! the session, each `next` names the lit light, and the final `next`
//! acknowledges the finished session so the refreshed light list is
//! shown straight away.

use serde::Serialize;

use pylights_core::{Controller, RemapSession};

use crate::cli::{GlobalOpts, RemapArgs, RemapCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct Progress {
    active: bool,
    current: Option<String>,
    remaining: Vec<String>,
}

impl From<&RemapSession> for Progress {
    fn from(session: &RemapSession) -> Self {
        Self {
            active: session.is_active(),
            current: session.current().map(str::to_owned),
            remaining: session.remaining().to_vec(),
        }
    }
}

fn detail(progress: &Progress, color: bool) -> String {
    match &progress.current {
        Some(current) => format!(
            "Light {} is on. Name it with: pylights remap next <name>\n{} remaining",
            output::accent(current, color),
            progress.remaining.len(),
        ),
        None if progress.active => "All lights named.".into(),
        None => "No remap in progress.".into(),
    }
}

fn print_progress(session: &RemapSession, global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &Progress::from(session),
        |p| detail(p, color),
        |p| p.current.clone().unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle(
    controller: &Controller,
    args: RemapArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        RemapCommand::Start => {
            if !util::confirm(
                "Start remapping? Light names will be reassigned.",
                global.yes,
            )? {
                return Ok(());
            }
            let session = controller.start_remap().await?;
            print_progress(&session, global);
            Ok(())
        }

        RemapCommand::Next { name } => {
            let session = controller.next_remap(&name).await?;
            if session.is_complete() {
                controller.acknowledge_remap().await?;
                util::status("Remap complete", global.quiet);
                return Ok(());
            }
            print_progress(&session, global);
            Ok(())
        }

        RemapCommand::Cancel => {
            let session = controller.cancel_remap().await?;
            util::status("Remap cancelled", global.quiet);
            print_progress(&session, global);
            Ok(())
        }
    }
}
