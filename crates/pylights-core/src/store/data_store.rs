// ── Central reactive data store ──
//
// Single owner of `ClientState`. Every mutation runs inside the watch
// channel's write lock (`send_modify` / `send_if_modified`), which
// serializes writers and broadcasts each change to subscribers.

use std::sync::Arc;

use pylights_api::Descriptor;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use url::Url;

use super::reconcile::{ReconcileOutcome, reconcile};
use crate::model::{ClientState, RemapSession, Tick};
use crate::stream::StateStream;

/// Reactive store for the client's view of the device.
///
/// Readers get cheap `Arc` snapshots. Writers clone-on-write through
/// `Arc::make_mut`, so outstanding snapshots are never disturbed.
pub struct DataStore {
    state: watch::Sender<Arc<ClientState>>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Arc::new(ClientState::default()));
        Self { state }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn snapshot(&self) -> Arc<ClientState> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ClientState>> {
        self.state.subscribe()
    }

    pub fn stream(&self) -> StateStream {
        StateStream::new(self.subscribe())
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Reconcile a decoded response into the state.
    pub fn apply(&self, descriptor: Descriptor) -> ReconcileOutcome {
        let kind = descriptor.kind();
        let mut outcome = ReconcileOutcome::default();
        self.state.send_if_modified(|state| {
            outcome = reconcile(Arc::make_mut(state), descriptor);
            outcome.changed
        });
        debug!(kind, changed = outcome.changed, "reconciled response");
        outcome
    }

    pub fn set_base_url(&self, base_url: Option<Url>) {
        self.modify_if(|state| {
            if state.base_url == base_url {
                return false;
            }
            state.base_url = base_url;
            true
        });
    }

    pub fn set_loading(&self, loading: bool) {
        self.modify_if(|state| {
            if state.loading == loading {
                return false;
            }
            state.loading = loading;
            true
        });
    }

    /// Drop developer diagnostics (the developer view closed).
    pub fn clear_developer(&self) {
        self.modify_if(|state| state.developer.take().is_some());
    }

    /// Destroy a finished remap session. Returns `false` (and leaves the
    /// session alone) when the session is idle or still has lights left.
    pub fn clear_completed_remap(&self) -> bool {
        self.modify_if(|state| {
            if !state.remap.is_complete() {
                return false;
            }
            state.remap = RemapSession::Idle;
            true
        })
    }

    /// Forget everything learned from the device.
    pub fn reset(&self) {
        self.modify_if(|state| {
            if *state == ClientState::default() {
                return false;
            }
            *state = ClientState::default();
            true
        });
    }

    /// One playback clock step, decided and applied under the write lock.
    ///
    /// A cancelled `run` never mutates state: the token is checked after
    /// the lock is taken, and a reconciliation always cancels the old run
    /// before it applies. When the song end is reached the run cancels
    /// itself under the same lock.
    pub(crate) fn advance_playback(&self, step_ms: u64, run: &CancellationToken) -> Tick {
        let mut tick = Tick::Stopped;
        self.state.send_if_modified(|state| {
            if run.is_cancelled() {
                return false;
            }
            tick = state.playback.next_tick(step_ms);
            match tick {
                Tick::Advance(position_ms) => {
                    Arc::make_mut(state).playback.position_ms = position_ms;
                    true
                }
                Tick::ReachedEnd => {
                    run.cancel();
                    false
                }
                Tick::Stopped => false,
            }
        });
        tick
    }

    /// `send_if_modified` over the inner state, cloning only on write.
    fn modify_if(&self, f: impl FnOnce(&mut ClientState) -> bool) -> bool {
        self.state.send_if_modified(|state| {
            // Probe a scratch copy only when someone else holds the snapshot.
            if Arc::get_mut(state).is_some() {
                return f(Arc::make_mut(state));
            }
            let mut next = ClientState::clone(state);
            if f(&mut next) {
                *state = Arc::new(next);
                true
            } else {
                false
            }
        })
    }
}
