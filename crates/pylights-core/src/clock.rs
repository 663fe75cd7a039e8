// ── Local playback clock ──
//
// Between device refreshes the current song's position is interpolated
// locally: one repeating timer advances it by a fixed step. The timer only
// runs while a song is loaded and not paused. It never pushes the position
// past the end of the song; instead it stops and asks the controller for a
// fresh `/info` so the device can say what plays next.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::Notify;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::model::{ClientState, Tick};
use crate::store::DataStore;

pub struct PlaybackClock {
    store: Arc<DataStore>,
    period: Duration,
    /// Token of the current timer task, if one was started.
    run: Mutex<Option<CancellationToken>>,
    refresh: Arc<Notify>,
}

impl PlaybackClock {
    /// `refresh` is notified whenever a song reaches its end.
    pub fn new(store: Arc<DataStore>, period: Duration, refresh: Arc<Notify>) -> Self {
        Self {
            store,
            period,
            run: Mutex::new(None),
            refresh,
        }
    }

    /// Stop the timer, run `apply`, then restart the timer if the
    /// resulting state is playing.
    ///
    /// Every write that replaces the playback slice goes through here, so
    /// a reconciliation can never interleave with a stale tick and two
    /// timers can never run at once.
    pub fn resync<R>(&self, apply: impl FnOnce() -> R) -> R {
        self.resync_if(apply, |_| true)
    }

    /// Like [`resync`](Self::resync), but the timer is only re-armed when
    /// `allow` accepts the state left behind by `apply`.
    ///
    /// The check runs under the clock lock, so a concurrent
    /// [`stop`](Self::stop) either cancels the new timer or happens before
    /// the check.
    pub fn resync_if<R>(
        &self,
        apply: impl FnOnce() -> R,
        allow: impl FnOnce(&ClientState) -> bool,
    ) -> R {
        let mut run = self.run.lock().expect("clock lock poisoned");
        if let Some(old) = run.take() {
            old.cancel();
        }

        let result = apply();

        let state = self.store.snapshot();
        if state.playback.is_playing() && allow(&state) {
            let token = CancellationToken::new();
            tokio::spawn(tick_loop(
                Arc::clone(&self.store),
                self.period,
                token.clone(),
                Arc::clone(&self.refresh),
            ));
            *run = Some(token);
            trace!("playback clock armed");
        }

        result
    }

    /// Stop the timer. Safe to call when nothing is running.
    pub fn stop(&self) {
        if let Some(run) = self.run.lock().expect("clock lock poisoned").take() {
            run.cancel();
            trace!("playback clock stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.run
            .lock()
            .expect("clock lock poisoned")
            .as_ref()
            .is_some_and(|run| !run.is_cancelled())
    }
}

impl Drop for PlaybackClock {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn tick_loop(
    store: Arc<DataStore>,
    period: Duration,
    run: CancellationToken,
    refresh: Arc<Notify>,
) {
    let step_ms = u64::try_from(period.as_millis()).unwrap_or(u64::MAX);
    let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            () = run.cancelled() => break,
            _ = ticker.tick() => {
                match store.advance_playback(step_ms, &run) {
                    Tick::Advance(position_ms) => trace!(position_ms, "playback clock tick"),
                    Tick::ReachedEnd => {
                        debug!("song reached its end, requesting refresh");
                        refresh.notify_one();
                        break;
                    }
                    Tick::Stopped => break,
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pylights_api::{Descriptor, SongDescriptor, SongsDescriptor};

    const PERIOD: Duration = Duration::from_secs(1);

    fn songs(position: f64, length: f64, paused: bool) -> Descriptor {
        let song = SongDescriptor {
            title: "Christmas Canon".into(),
            artist: "Trans-Siberian Orchestra".into(),
            album_art: String::new(),
            length_ms: length,
        };
        Descriptor::Songs(SongsDescriptor {
            songs: vec![song.clone()],
            playing: Some(song),
            paused,
            current_time_ms: position,
            volume: 80,
        })
    }

    fn setup() -> (Arc<DataStore>, PlaybackClock, Arc<Notify>) {
        let store = Arc::new(DataStore::new());
        let refresh = Arc::new(Notify::new());
        let clock = PlaybackClock::new(Arc::clone(&store), PERIOD, Arc::clone(&refresh));
        (store, clock, refresh)
    }

    async fn refresh_requested(refresh: &Notify) -> bool {
        tokio::time::timeout(Duration::from_millis(1), refresh.notified())
            .await
            .is_ok()
    }

    #[tokio::test(start_paused = true)]
    async fn advances_one_step_per_tick() {
        let (store, clock, refresh) = setup();
        clock.resync(|| store.apply(songs(10_000.0, 20_000.0, false)));

        tokio::time::sleep(Duration::from_millis(3_500)).await;

        assert_eq!(store.snapshot().playback.position_ms, 13_000);
        assert!(clock.is_running());
        assert!(!refresh_requested(&refresh).await);
    }

    #[tokio::test(start_paused = true)]
    async fn stops_and_requests_refresh_at_song_end() {
        let (store, clock, refresh) = setup();
        clock.resync(|| store.apply(songs(19_500.0, 20_000.0, false)));

        tokio::time::sleep(Duration::from_millis(1_500)).await;

        assert_eq!(store.snapshot().playback.position_ms, 19_500);
        assert!(!clock.is_running());
        assert!(refresh_requested(&refresh).await);
    }

    #[tokio::test(start_paused = true)]
    async fn resync_restarts_instead_of_duplicating() {
        let (store, clock, _refresh) = setup();
        clock.resync(|| store.apply(songs(10_000.0, 20_000.0, false)));
        tokio::time::sleep(Duration::from_millis(500)).await;

        clock.resync(|| store.apply(songs(10_000.0, 20_000.0, false)));
        tokio::time::sleep(Duration::from_millis(1_700)).await;

        // Only the second timer ticked, once, at t = 1.5s.
        assert_eq!(store.snapshot().playback.position_ms, 11_000);
    }

    #[tokio::test(start_paused = true)]
    async fn paused_song_does_not_arm_the_clock() {
        let (store, clock, _refresh) = setup();
        clock.resync(|| store.apply(songs(10_000.0, 20_000.0, true)));

        tokio::time::sleep(Duration::from_millis(2_500)).await;

        assert!(!clock.is_running());
        assert_eq!(store.snapshot().playback.position_ms, 10_000);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_is_idempotent_and_freezes_position() {
        let (store, clock, _refresh) = setup();
        clock.stop();

        clock.resync(|| store.apply(songs(0.0, 20_000.0, false)));
        tokio::time::sleep(Duration::from_millis(1_200)).await;
        clock.stop();
        clock.stop();
        tokio::time::sleep(Duration::from_millis(3_000)).await;

        assert_eq!(store.snapshot().playback.position_ms, 1_000);
        assert!(!clock.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_state_is_applied_but_not_timed() {
        let (store, clock, _refresh) = setup();
        let previous = clock.resync(|| store.apply(songs(10_000.0, 20_000.0, false)));
        assert!(previous.playback_replaced);

        clock.resync_if(
            || store.apply(songs(5_000.0, 20_000.0, false)),
            ClientState::is_connected,
        );
        tokio::time::sleep(Duration::from_millis(2_500)).await;

        assert!(!clock.is_running());
        assert_eq!(store.snapshot().playback.position_ms, 5_000);
    }
}
