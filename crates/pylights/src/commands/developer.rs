//! Developer diagnostics handlers.

use pylights_core::{Controller, DeveloperInfo};

use crate::cli::{DeveloperArgs, DeveloperCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

fn detail(info: &DeveloperInfo, color: bool) -> String {
    let led_server = match (&info.led_server_ip_address, info.led_server_online) {
        (Some(ip), Some(online)) => format!("{ip} ({})", output::on_off(online, color)),
        (Some(ip), None) => ip.clone(),
        (None, Some(online)) => output::on_off(online, color),
        (None, None) => "-".into(),
    };
    [
        format!("Version:     {}", info.version),
        format!("IP address:  {}", info.ip_address),
        format!("CPU usage:   {:.1}%", info.cpu_usage_pct),
        format!("LED server:  {led_server}"),
        format!(
            "Serial port: {}",
            info.serial_port.as_deref().unwrap_or("-")
        ),
    ]
    .join("\n")
}

fn print_info(info: &DeveloperInfo, global: &GlobalOpts) {
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        info,
        |i| detail(i, color),
        |i| i.version.clone(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle(
    controller: &Controller,
    args: DeveloperArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let result = match args.command {
        DeveloperCommand::Info => controller.developer_info().await,
        DeveloperCommand::Recompile => {
            if !util::confirm(
                "Recompile all light shows? Playback may stutter while it runs.",
                global.yes,
            )? {
                return Ok(());
            }
            let info = controller.recompile_shows().await;
            if info.is_ok() {
                util::status("Shows recompiled", global.quiet);
            }
            info
        }
    };
    let info = result?;
    print_info(&info, global);
    controller.close_developer();
    Ok(())
}
