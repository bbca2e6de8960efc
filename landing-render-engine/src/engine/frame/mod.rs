//! Per-frame callback scheduling for the 3D surfaces.

/// Callback registry, cancellation handles and the exclusive runner system.
pub mod scheduler;

use bevy::prelude::*;

use scheduler::{FrameScheduler, run_frame_callbacks};

pub struct FramePlugin;

impl Plugin for FramePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameScheduler>()
            .add_systems(Update, run_frame_callbacks);
    }
}
