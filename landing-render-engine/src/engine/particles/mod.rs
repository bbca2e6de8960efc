//! Ambient particle field simulation.
//!
//! The field is independent of scroll and reveal state. It is mounted by the
//! particle backdrop surface and advanced by a frame callback.

/// Particle population, seeding and per-frame advance.
pub mod field;

/// Point list mesh and the frame callback writing into it.
pub mod mesh;
