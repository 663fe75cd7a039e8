//! Preset command handlers.

use tabled::Tabled;

use pylights_core::{Controller, Preset};

use crate::cli::{GlobalOpts, PresetsArgs, PresetsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct PresetRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Lights")]
    lights: String,
}

impl From<&Preset> for PresetRow {
    fn from(p: &Preset) -> Self {
        Self {
            name: p.name.clone(),
            lights: p.lights.join(", "),
        }
    }
}

pub async fn handle(
    controller: &Controller,
    args: PresetsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        PresetsCommand::List => {
            let snap = controller.snapshot();
            let out = output::render_list(
                &global.output,
                &snap.presets,
                |p| PresetRow::from(p),
                |p| p.name.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        PresetsCommand::Activate { name } => {
            util::require_preset(controller, &name)?;
            controller.activate_preset(&name).await?;
            util::status(&format!("Preset '{name}' applied"), global.quiet);
            Ok(())
        }

        PresetsCommand::Add { name, lights } => {
            for light in &lights {
                util::require_light(controller, light)?;
            }
            controller.add_preset(&name, &lights).await?;
            util::status(&format!("Preset '{name}' saved"), global.quiet);
            Ok(())
        }
    }
}
