use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::path::{CONFIG_LOAD_TIMEOUT, LANDING_CONFIG_PATH};
use std::time::Duration;

use super::progress::LoadingProgress;
use crate::sections::config::{ActiveLandingConfig, LandingConfig};

#[derive(Resource, Default)]
pub struct ConfigLoader {
    handle: Option<Handle<LandingConfig>>,
    requested_at: Duration,
}

// Start the loading process
pub fn start_loading(
    mut loader: ResMut<ConfigLoader>,
    mut progress: ResMut<LoadingProgress>,
    asset_server: Res<AssetServer>,
    time: Res<Time>,
) {
    info!("Loading landing config from {}", LANDING_CONFIG_PATH);
    loader.handle = Some(asset_server.load(LANDING_CONFIG_PATH));
    loader.requested_at = time.elapsed();
    progress.config_requested = true;
}

/// Resolve the active config once: from the asset when it arrives, from
/// defaults when it fails or takes longer than the timeout.
pub fn load_config_system(
    mut progress: ResMut<LoadingProgress>,
    mut active: ResMut<ActiveLandingConfig>,
    loader: Res<ConfigLoader>,
    asset_server: Res<AssetServer>,
    configs: Res<Assets<LandingConfig>>,
    time: Res<Time>,
) {
    if progress.config_resolved {
        return;
    }
    let Some(handle) = loader.handle.as_ref() else {
        return;
    };

    let loaded = if let Some(config) = configs.get(handle) {
        Some(config.clone())
    } else if let LoadState::Failed(error) = asset_server.load_state(handle.id()) {
        warn!("Landing config failed to load, using defaults: {}", error);
        None
    } else if time.elapsed().saturating_sub(loader.requested_at) >= CONFIG_LOAD_TIMEOUT {
        warn!(
            "Landing config not loaded after {:?}, using defaults",
            CONFIG_LOAD_TIMEOUT
        );
        None
    } else {
        return;
    };

    let (config, used_defaults) = resolve_config(loaded);
    active.0 = config;
    progress.used_defaults = used_defaults;
    progress.config_resolved = true;
    info!("✓ Landing config resolved");
}

/// Sanitise a loaded config, or fall back to defaults. The flag reports
/// whether any part of the result came from defaults.
pub fn resolve_config(loaded: Option<LandingConfig>) -> (LandingConfig, bool) {
    let Some(config) = loaded else {
        return (LandingConfig::default(), true);
    };
    let (config, problems) = config.sanitized();
    for problem in &problems {
        warn!("Landing config section replaced by defaults: {}", problem);
    }
    (config, !problems.is_empty())
}
