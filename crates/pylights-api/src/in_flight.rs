// Process-wide "requests in flight" counter.
//
// Every request holds an `InFlightGuard` for its whole lifetime. The
// guard decrements on drop, so the count stays correct on success,
// error, and when the request future is dropped mid-flight.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared counter of outstanding requests, observable via a `watch` channel.
///
/// Cheap to clone; all clones share the same count.
#[derive(Debug, Clone)]
pub struct InFlight {
    count: Arc<watch::Sender<usize>>,
}

impl Default for InFlight {
    fn default() -> Self {
        Self::new()
    }
}

impl InFlight {
    pub fn new() -> Self {
        let (count, _) = watch::channel(0usize);
        Self {
            count: Arc::new(count),
        }
    }

    /// Register one outstanding request. Released when the guard drops.
    pub fn acquire(&self) -> InFlightGuard {
        // `send_modify` updates unconditionally, even with zero receivers.
        self.count.send_modify(|c| *c += 1);
        InFlightGuard {
            count: Arc::clone(&self.count),
        }
    }

    /// Number of requests currently outstanding.
    pub fn current(&self) -> usize {
        *self.count.borrow()
    }

    /// `true` while at least one request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.current() > 0
    }

    /// Subscribe to count changes.
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.count.subscribe()
    }
}

/// Scoped registration of one request in an [`InFlight`] counter.
#[derive(Debug)]
pub struct InFlightGuard {
    count: Arc<watch::Sender<usize>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.count.send_modify(|c| *c = c.saturating_sub(1));
    }
}
