//! Startup loading of the landing page config.
//!
//! The config asset is requested on startup and resolved once: either from
//! the parsed file or, on failure or timeout, from defaults. The app then
//! leaves the `Loading` state.

/// Config asset request, resolution and fallback.
pub mod config_loader;

/// Loading progress flags driving the state transition.
pub mod progress;
