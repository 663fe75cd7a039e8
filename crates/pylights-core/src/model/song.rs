// ── Songs and playback ──

use serde::{Deserialize, Serialize};

/// Album art exactly as the device sent it (base64 text).
///
/// Decoding is left to whoever renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlbumArt(String);

impl AlbumArt {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Commands address songs by title.
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "AlbumArt::is_empty")]
    pub album_art: AlbumArt,
    pub length_ms: u64,
}

/// Playback slice of the client state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Every song the device knows, in device order.
    pub songs: Vec<Song>,
    /// `None` when nothing is loaded.
    pub current: Option<Song>,
    /// Only meaningful while `current` is `Some`.
    pub paused: bool,
    pub position_ms: u64,
    /// 0-100.
    pub volume: u8,
}

/// What one clock tick should do to a [`PlaybackState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Move the position to the contained value.
    Advance(u64),
    /// The next step would reach the end of the song; the device decides
    /// what happens next, so the clock stops and asks for a refresh.
    ReachedEnd,
    /// Nothing is playing (no song, or paused).
    Stopped,
}

impl PlaybackState {
    /// `true` while a song is loaded and not paused.
    pub fn is_playing(&self) -> bool {
        self.current.is_some() && !self.paused
    }

    /// Length of the current song, if any.
    pub fn length_ms(&self) -> Option<u64> {
        self.current.as_ref().map(|s| s.length_ms)
    }

    /// Decide the outcome of advancing by `step_ms`.
    pub fn next_tick(&self, step_ms: u64) -> Tick {
        let Some(song) = self.current.as_ref().filter(|_| !self.paused) else {
            return Tick::Stopped;
        };
        let next = self.position_ms.saturating_add(step_ms);
        if next >= song.length_ms {
            Tick::ReachedEnd
        } else {
            Tick::Advance(next)
        }
    }

    /// Find a known song by title. Titles are not guaranteed unique; the
    /// first match wins.
    pub fn song_by_title(&self, title: &str) -> Option<&Song> {
        self.songs.iter().find(|s| s.title == title)
    }
}
