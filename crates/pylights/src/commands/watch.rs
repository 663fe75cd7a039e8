//! `pylights watch`: live now-playing view.
//!
//! Follows the controller's state stream until Ctrl-C. In table mode a
//! single status line is redrawn in place, spinning while requests are
//! slow; every other format emits one compact JSON document per change.

use std::time::Duration;

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};

use pylights_core::{ClientState, Controller};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

const SPIN_INTERVAL: Duration = Duration::from_millis(120);

fn status_line(state: &ClientState, color: bool) -> String {
    let playback = &state.playback;
    let playing = match (&playback.current, playback.length_ms()) {
        (Some(song), Some(length)) => format!(
            "{} - {}  {} / {}{}",
            output::accent(&song.title, color),
            song.artist,
            output::format_ms(playback.position_ms),
            output::format_ms(length),
            if playback.paused { "  paused" } else { "" },
        ),
        _ => "stopped".into(),
    };
    let lights_on = state.lights.iter().filter(|l| l.on).count();
    format!(
        "{playing}  |  vol {}%  |  {lights_on}/{} lights on",
        playback.volume,
        state.lights.len()
    )
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let mut states = controller.state().into_stream();

    if !matches!(global.output, OutputFormat::Table) {
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => return Ok(()),
                next = states.next() => match next {
                    Some(state) => {
                        output::print_output(&output::render_json_line(state.as_ref()), global.quiet);
                    }
                    None => return Ok(()),
                },
            }
        }
    }

    let color = output::should_color(&global.color);
    let bar = if global.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .map_err(|e| CliError::Internal(format!("progress template: {e}")))?,
    );

    let mut spinning = false;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            next = states.next() => {
                let Some(state) = next else { break };
                if state.loading != spinning {
                    spinning = state.loading;
                    if spinning {
                        bar.enable_steady_tick(SPIN_INTERVAL);
                    } else {
                        bar.disable_steady_tick();
                    }
                }
                bar.set_message(status_line(&state, color));
            }
        }
    }

    bar.finish_and_clear();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pylights_core::{AlbumArt, Light, PlaybackState, Song};

    #[test]
    fn status_line_shows_song_progress_and_lights() {
        let song = Song {
            title: "Carol of the Bells".into(),
            artist: "TSO".into(),
            album_art: AlbumArt::default(),
            length_ms: 187_000,
        };
        let state = ClientState {
            playback: PlaybackState {
                songs: vec![song.clone()],
                current: Some(song),
                paused: true,
                position_ms: 61_000,
                volume: 40,
            },
            lights: vec![
                Light { name: "porch".into(), channel: 17, on: true },
                Light { name: "tree".into(), channel: 27, on: false },
            ],
            ..ClientState::default()
        };

        assert_eq!(
            status_line(&state, false),
            "Carol of the Bells - TSO  1:01 / 3:07  paused  |  vol 40%  |  1/2 lights on"
        );
    }

    #[test]
    fn status_line_when_stopped() {
        let line = status_line(&ClientState::default(), false);
        assert!(line.starts_with("stopped"));
    }
}
