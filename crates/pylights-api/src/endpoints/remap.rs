// Remap workflow endpoints
//
// The device owns the session. Each call returns the names still
// awaiting assignment: `null` when no session exists, `[]` once every
// light has been mapped.

use tracing::debug;

use crate::client::PylightsClient;
use crate::error::Error;
use crate::models::RemapDescriptor;

impl PylightsClient {
    /// `GET /remap/start`
    pub async fn start_remap(&self) -> Result<RemapDescriptor, Error> {
        debug!("starting remap session");
        self.get("/remap/start", &[]).await
    }

    /// Report that the light called `name` has just been mapped.
    ///
    /// `GET /remap/next?name={name}`
    pub async fn next_remap(&self, name: &str) -> Result<RemapDescriptor, Error> {
        debug!(name, "advancing remap session");
        self.get("/remap/next", &[("name", name.to_owned())]).await
    }

    /// `GET /remap/cancel`
    pub async fn cancel_remap(&self) -> Result<RemapDescriptor, Error> {
        debug!("cancelling remap session");
        self.get("/remap/cancel", &[]).await
    }
}
