// ── Client state store ──
//
// `DataStore` owns the single `ClientState`; `reconcile` is the pure
// function that folds one decoded response into it.

mod data_store;
mod reconcile;

pub use data_store::DataStore;
pub use reconcile::{ReconcileOutcome, reconcile};
