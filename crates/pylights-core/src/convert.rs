// ── API-to-domain type conversions ──
//
// Bridges raw `pylights_api` descriptors into canonical `pylights_core::model`
// types. The device reports times as floating-point milliseconds and volume
// as a bare integer; both are normalized here so the rest of the engine only
// deals in clamped unsigned values.

use pylights_api::{
    DeveloperDescriptor, LightDescriptor, PresetDescriptor, SongDescriptor, SongsDescriptor,
};

use crate::model::{AlbumArt, DeveloperInfo, Light, PlaybackState, Preset, Song};

// ── Helpers ────────────────────────────────────────────────────────

/// Round a wire millisecond value to `u64`. Negative, NaN and infinite
/// inputs become 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::as_conversions)]
fn millis(raw: f64) -> u64 {
    if raw.is_finite() && raw > 0.0 {
        // Saturating float-to-int cast.
        raw.round() as u64
    } else {
        0
    }
}

fn clamp_volume(raw: i64) -> u8 {
    u8::try_from(raw.clamp(0, 100)).unwrap_or(100)
}

// ── Songs ──────────────────────────────────────────────────────────

impl From<SongDescriptor> for Song {
    fn from(d: SongDescriptor) -> Self {
        Self {
            title: d.title,
            artist: d.artist,
            album_art: AlbumArt::new(d.album_art),
            length_ms: millis(d.length_ms),
        }
    }
}

impl From<SongsDescriptor> for PlaybackState {
    fn from(d: SongsDescriptor) -> Self {
        let current: Option<Song> = d.playing.map(Song::from);
        let position_ms = match &current {
            Some(song) => millis(d.current_time_ms).min(song.length_ms),
            None => 0,
        };

        Self {
            songs: d.songs.into_iter().map(Song::from).collect(),
            // Paused is meaningless without a current song.
            paused: current.is_some() && d.paused,
            current,
            position_ms,
            volume: clamp_volume(d.volume),
        }
    }
}

// ── Lights & presets ───────────────────────────────────────────────

impl From<LightDescriptor> for Light {
    fn from(d: LightDescriptor) -> Self {
        Self {
            name: d.name,
            channel: d.gpio,
            on: d.value,
        }
    }
}

impl From<PresetDescriptor> for Preset {
    fn from(d: PresetDescriptor) -> Self {
        Self {
            name: d.name,
            lights: d.lights,
        }
    }
}

// ── Developer ──────────────────────────────────────────────────────

impl From<DeveloperDescriptor> for DeveloperInfo {
    fn from(d: DeveloperDescriptor) -> Self {
        Self {
            version: d.version,
            ip_address: d.ip_address,
            cpu_usage_pct: d.cpu_usage,
            led_server_ip_address: d.led_server_ip_address,
            led_server_online: d.led_server_status,
            serial_port: d.serial_port,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn song(length_ms: f64) -> SongDescriptor {
        SongDescriptor {
            title: "Sarajevo 12/24".into(),
            artist: "Savatage".into(),
            album_art: "aGVsbG8=".into(),
            length_ms,
        }
    }

    fn songs(playing: Option<SongDescriptor>, current_time_ms: f64, volume: i64) -> SongsDescriptor {
        SongsDescriptor {
            songs: vec![song(200_000.0)],
            playing,
            paused: true,
            current_time_ms,
            volume,
        }
    }

    #[test]
    fn millis_rounds_and_floors_at_zero() {
        assert_eq!(millis(1234.6), 1235);
        assert_eq!(millis(-5.0), 0);
        assert_eq!(millis(f64::NAN), 0);
    }

    #[test]
    fn position_clamped_to_song_length() {
        let state = PlaybackState::from(songs(Some(song(20_000.0)), 25_000.0, 50));
        assert_eq!(state.position_ms, 20_000);
    }

    #[test]
    fn no_current_song_resets_position_and_paused() {
        let state = PlaybackState::from(songs(None, 4_000.0, 50));
        assert_eq!(state.position_ms, 0);
        assert!(!state.paused);
    }

    #[test]
    fn volume_clamped_into_percent_range() {
        assert_eq!(PlaybackState::from(songs(None, 0.0, 140)).volume, 100);
        assert_eq!(PlaybackState::from(songs(None, 0.0, -3)).volume, 0);
    }

    #[test]
    fn album_art_carried_verbatim() {
        let s = Song::from(song(1.0));
        assert_eq!(s.album_art.as_str(), "aGVsbG8=");
    }
}
