// Song playback endpoints
//
// Every call answers with the full `SongsDescriptor`, so the caller always
// gets fresh playback truth back from a command.

use tracing::debug;

use crate::client::PylightsClient;
use crate::error::Error;
use crate::models::SongsDescriptor;

impl PylightsClient {
    /// Start playing a song by title.
    ///
    /// `GET /songs/play?name={title}`
    pub async fn play_song(&self, title: &str) -> Result<SongsDescriptor, Error> {
        debug!(title, "playing song");
        self.get("/songs/play", &[("name", title.to_owned())]).await
    }

    /// `GET /songs/pause`
    pub async fn pause_song(&self) -> Result<SongsDescriptor, Error> {
        self.get("/songs/pause", &[]).await
    }

    /// `GET /songs/resume`
    pub async fn resume_song(&self) -> Result<SongsDescriptor, Error> {
        self.get("/songs/resume", &[]).await
    }

    /// `GET /songs/stop`
    pub async fn stop_song(&self) -> Result<SongsDescriptor, Error> {
        self.get("/songs/stop", &[]).await
    }

    /// Set the output volume. The device rejects out-of-range values.
    ///
    /// `GET /songs/volume?value={value}`
    pub async fn set_volume(&self, value: i64) -> Result<SongsDescriptor, Error> {
        debug!(value, "setting volume");
        self.get("/songs/volume", &[("value", value.to_string())])
            .await
    }
}
