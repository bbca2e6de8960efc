use bevy::prelude::*;

#[derive(Resource, Debug, Default)]
pub struct LoadingProgress {
    pub config_requested: bool,
    pub config_resolved: bool,
    /// Set when the page was built from defaults instead of the config file.
    pub used_defaults: bool,
}
