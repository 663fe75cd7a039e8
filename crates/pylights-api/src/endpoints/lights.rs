// Light endpoints

use tracing::debug;

use crate::client::PylightsClient;
use crate::error::Error;
use crate::models::LightsDescriptor;

impl PylightsClient {
    /// `GET /lights/all-on`
    pub async fn all_lights_on(&self) -> Result<LightsDescriptor, Error> {
        self.get("/lights/all-on", &[]).await
    }

    /// `GET /lights/all-off`
    pub async fn all_lights_off(&self) -> Result<LightsDescriptor, Error> {
        self.get("/lights/all-off", &[]).await
    }

    /// `GET /lights/turn-on?name={name}`
    pub async fn turn_on_light(&self, name: &str) -> Result<LightsDescriptor, Error> {
        debug!(name, "turning light on");
        self.get("/lights/turn-on", &[("name", name.to_owned())])
            .await
    }

    /// `GET /lights/turn-off?name={name}`
    pub async fn turn_off_light(&self, name: &str) -> Result<LightsDescriptor, Error> {
        debug!(name, "turning light off");
        self.get("/lights/turn-off", &[("name", name.to_owned())])
            .await
    }

    /// `GET /lights/toggle?name={name}`
    pub async fn toggle_light(&self, name: &str) -> Result<LightsDescriptor, Error> {
        debug!(name, "toggling light");
        self.get("/lights/toggle", &[("name", name.to_owned())])
            .await
    }
}
