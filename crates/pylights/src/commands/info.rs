//! `pylights info`: now playing plus a device summary.

use serde::Serialize;

use pylights_core::{ClientState, Controller};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct Summary {
    address: Option<String>,
    now_playing: Option<String>,
    artist: Option<String>,
    paused: bool,
    position_ms: u64,
    length_ms: Option<u64>,
    volume: u8,
    songs: usize,
    lights: usize,
    lights_on: usize,
    presets: usize,
    refreshed_at: Option<String>,
}

impl From<&ClientState> for Summary {
    fn from(s: &ClientState) -> Self {
        let current = s.playback.current.as_ref();
        Self {
            address: s.base_url.as_ref().map(ToString::to_string),
            now_playing: current.map(|song| song.title.clone()),
            artist: current.map(|song| song.artist.clone()),
            paused: s.playback.paused,
            position_ms: s.playback.position_ms,
            length_ms: s.playback.length_ms(),
            volume: s.playback.volume,
            songs: s.playback.songs.len(),
            lights: s.lights.len(),
            lights_on: s.lights.iter().filter(|l| l.on).count(),
            presets: s.presets.len(),
            refreshed_at: s.last_refresh.map(|t| t.to_rfc3339()),
        }
    }
}

fn detail(summary: &Summary, color: bool) -> String {
    let playing = match (&summary.now_playing, summary.length_ms) {
        (Some(title), Some(length)) => format!(
            "{} by {}  {} / {}{}",
            output::accent(title, color),
            summary.artist.as_deref().unwrap_or("unknown"),
            output::format_ms(summary.position_ms),
            output::format_ms(length),
            if summary.paused { "  (paused)" } else { "" },
        ),
        _ => "nothing".into(),
    };

    let refreshed = summary
        .refreshed_at
        .as_deref()
        .and_then(|t| chrono::DateTime::parse_from_rfc3339(t).ok())
        .map_or_else(
            || "-".into(),
            |t| t.with_timezone(&chrono::Local).format("%H:%M:%S").to_string(),
        );

    [
        format!("Device:      {}", summary.address.as_deref().unwrap_or("-")),
        format!("Now playing: {playing}"),
        format!("Volume:      {}%", summary.volume),
        format!("Songs:       {}", summary.songs),
        format!("Lights:      {} ({} on)", summary.lights, summary.lights_on),
        format!("Presets:     {}", summary.presets),
        format!("Refreshed:   {refreshed}"),
    ]
    .join("\n")
}

pub fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let summary = Summary::from(controller.snapshot().as_ref());
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &summary,
        |s| detail(s, color),
        |s| s.now_playing.clone().unwrap_or_default(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
