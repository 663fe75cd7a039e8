// Preset endpoints

use tracing::debug;

use crate::client::PylightsClient;
use crate::error::Error;
use crate::models::PresetsDescriptor;

impl PylightsClient {
    /// Apply a stored preset.
    ///
    /// `GET /presets/activate?name={name}`
    pub async fn activate_preset(&self, name: &str) -> Result<PresetsDescriptor, Error> {
        debug!(name, "activating preset");
        self.get("/presets/activate", &[("name", name.to_owned())])
            .await
    }

    /// Store a new preset covering `lights`.
    ///
    /// `GET /presets/add?name={name}&lights={a,b,c}`
    pub async fn add_preset(
        &self,
        name: &str,
        lights: &[String],
    ) -> Result<PresetsDescriptor, Error> {
        debug!(name, count = lights.len(), "adding preset");
        self.get(
            "/presets/add",
            &[("name", name.to_owned()), ("lights", lights.join(","))],
        )
        .await
    }
}
