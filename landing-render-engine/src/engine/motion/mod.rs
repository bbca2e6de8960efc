//! Continuous and pointer-driven motion.

/// Periodic float and sway of 3D objects, driven by frame callbacks.
pub mod float_motion;

/// Hover lift and press scale of interactive page nodes.
pub mod hover;

/// Drag-to-rotate of the floating model.
pub mod orbit;

use bevy::prelude::*;

use hover::{apply_hover_scale, step_hover_motion};
use orbit::orbit_drag;

pub struct MotionPlugin;

impl Plugin for MotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            ((step_hover_motion, apply_hover_scale).chain(), orbit_drag),
        );
    }
}
