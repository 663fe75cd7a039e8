//! Song playback command handlers.

use tabled::Tabled;

use pylights_core::{Controller, Song};

use crate::cli::{GlobalOpts, SongsArgs, SongsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct SongRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Artist")]
    artist: String,
    #[tabled(rename = "Length")]
    length: String,
}

fn row(song: &Song, current: Option<&str>) -> SongRow {
    SongRow {
        marker: if current == Some(song.title.as_str()) { "▶" } else { "" },
        title: song.title.clone(),
        artist: song.artist.clone(),
        length: output::format_ms(song.length_ms),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: SongsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        SongsCommand::List => {
            let snap = controller.snapshot();
            let current = snap.playback.current.as_ref().map(|s| s.title.as_str());
            let out = output::render_list(
                &global.output,
                &snap.playback.songs,
                |s| row(s, current),
                |s| s.title.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        SongsCommand::Play { title } => {
            util::require_song(controller, &title)?;
            controller.play_song(&title).await?;
            util::status(&format!("Playing '{title}'"), global.quiet);
            Ok(())
        }

        SongsCommand::Pause => {
            controller.pause().await?;
            util::status("Paused", global.quiet);
            Ok(())
        }

        SongsCommand::Resume => {
            controller.resume().await?;
            util::status("Resumed", global.quiet);
            Ok(())
        }

        SongsCommand::Stop => {
            controller.stop().await?;
            util::status("Stopped", global.quiet);
            Ok(())
        }

        SongsCommand::Volume { value } => {
            controller.set_volume(value).await?;
            let volume = controller.snapshot().playback.volume;
            util::status(&format!("Volume set to {volume}%"), global.quiet);
            Ok(())
        }
    }
}
