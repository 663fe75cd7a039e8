//! Light command handlers.

use tabled::Tabled;

use pylights_core::{Controller, Light};

use crate::cli::{GlobalOpts, LightsArgs, LightsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct LightRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Channel")]
    channel: u32,
    #[tabled(rename = "State")]
    state: String,
}

fn row(light: &Light, color: bool) -> LightRow {
    LightRow {
        name: light.name.clone(),
        channel: light.channel,
        state: output::on_off(light.on, color),
    }
}

/// Print the light table after a change, so the user sees the outcome.
fn print_lights(controller: &Controller, global: &GlobalOpts) {
    let snap = controller.snapshot();
    let color = output::should_color(&global.color);
    let out = output::render_list(
        &global.output,
        &snap.lights,
        |l| row(l, color),
        |l| format!("{}\t{}", l.name, output::on_off(l.on, false)),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle(
    controller: &Controller,
    args: LightsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        LightsCommand::List => {}
        LightsCommand::On { name } => {
            util::require_light(controller, &name)?;
            controller.turn_on_light(&name).await?;
        }
        LightsCommand::Off { name } => {
            util::require_light(controller, &name)?;
            controller.turn_off_light(&name).await?;
        }
        LightsCommand::Toggle { name } => {
            util::require_light(controller, &name)?;
            controller.toggle_light(&name).await?;
        }
        LightsCommand::AllOn => controller.all_lights_on().await?,
        LightsCommand::AllOff => controller.all_lights_off().await?,
    }
    print_lights(controller, global);
    Ok(())
}
