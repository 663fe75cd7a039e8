// Endpoint groups
//
// Each module adds inherent methods to `PylightsClient` for one
// `/pylights-api/{group}/...` family. Every call is a GET that returns
// the group's descriptor shape.

pub mod developer;
pub mod lights;
pub mod presets;
pub mod remap;
pub mod songs;
