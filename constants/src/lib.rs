//! Shared tuning constants for the landing page motion engine.
//!
//! Values mirror the timings and placements of the marketing page the engine
//! renders, so both the runtime and its tests agree on them.

/// Hero floating model oscillation and orbit drag tuning.
pub mod motion;

/// Entrance animation timings, offsets and stagger increments.
pub mod reveal;

/// Camera placement, lighting and surface breakpoints for the 3D layers.
pub mod scene;

/// Ambient particle field population and spin rates.
pub mod particles;

/// Page layout metrics and palette.
pub mod layout;

/// Asset paths and load timeouts.
pub mod path;
