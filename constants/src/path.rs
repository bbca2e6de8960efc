use std::time::Duration;

/// Landing page config, relative to the asset root.
pub const LANDING_CONFIG_PATH: &str = "landing/landing.json";

/// How long the loader waits for the config before falling back to defaults.
pub const CONFIG_LOAD_TIMEOUT: Duration = Duration::from_secs(3);

/// Canvas element the wasm build renders into.
pub const CANVAS_SELECTOR: &str = "#landing";
