// ── Debounced loading indicator ──
//
// Mirrors the transport's in-flight counter into `ClientState::loading`,
// but only after requests have been outstanding for the debounce window.
// Quick requests never flash the indicator; going idle clears it at once.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::store::DataStore;

fn is_busy(counter: &mut watch::Receiver<usize>) -> bool {
    *counter.borrow_and_update() > 0
}

/// Runs until `cancel` fires or the counter's sender is dropped.
pub(crate) async fn loading_task(
    mut counter: watch::Receiver<usize>,
    store: Arc<DataStore>,
    debounce: Duration,
    cancel: CancellationToken,
) {
    loop {
        // Idle: wait for the first request.
        while !is_busy(&mut counter) {
            store.set_loading(false);
            tokio::select! {
                biased;
                () = cancel.cancelled() => return,
                changed = counter.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
            }
        }

        // Busy: show the indicator once the window expires, until idle.
        let deadline = tokio::time::sleep(debounce);
        tokio::pin!(deadline);
        let mut shown = false;
        loop {
            tokio::select! {
                biased;
                () = cancel.cancelled() => return,
                () = &mut deadline, if !shown => {
                    store.set_loading(true);
                    shown = true;
                }
                changed = counter.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    if !is_busy(&mut counter) {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pylights_api::InFlight;

    const DEBOUNCE: Duration = Duration::from_millis(200);

    fn spawn(in_flight: &InFlight, store: &Arc<DataStore>) -> CancellationToken {
        let cancel = CancellationToken::new();
        tokio::spawn(loading_task(
            in_flight.subscribe(),
            Arc::clone(store),
            DEBOUNCE,
            cancel.clone(),
        ));
        cancel
    }

    #[tokio::test(start_paused = true)]
    async fn short_request_never_shows_loading() {
        let in_flight = InFlight::new();
        let store = Arc::new(DataStore::new());
        let _cancel = spawn(&in_flight, &store);
        let mut rx = store.subscribe();

        let guard = in_flight.acquire();
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(guard);
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(!rx.has_changed().unwrap());
        assert!(!store.snapshot().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn long_request_shows_loading_until_idle() {
        let in_flight = InFlight::new();
        let store = Arc::new(DataStore::new());
        let _cancel = spawn(&in_flight, &store);

        let guard = in_flight.acquire();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!store.snapshot().loading);
        tokio::time::sleep(Duration::from_millis(350)).await;
        assert!(store.snapshot().loading);

        drop(guard);
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(!store.snapshot().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn overlapping_requests_keep_loading_on() {
        let in_flight = InFlight::new();
        let store = Arc::new(DataStore::new());
        let _cancel = spawn(&in_flight, &store);

        let first = in_flight.acquire();
        tokio::time::sleep(Duration::from_millis(300)).await;
        let second = in_flight.acquire();
        drop(first);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(store.snapshot().loading);

        drop(second);
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert!(!store.snapshot().loading);
    }
}
