// Developer endpoints

use tracing::debug;

use crate::client::PylightsClient;
use crate::error::Error;
use crate::models::DeveloperDescriptor;

impl PylightsClient {
    /// Rebuild the device's compiled light shows.
    ///
    /// `GET /developer/recompile-shows`
    pub async fn recompile_shows(&self) -> Result<DeveloperDescriptor, Error> {
        debug!("recompiling shows");
        self.get("/developer/recompile-shows", &[]).await
    }

    /// `GET /developer/info`
    pub async fn developer_info(&self) -> Result<DeveloperDescriptor, Error> {
        self.get("/developer/info", &[]).await
    }
}
