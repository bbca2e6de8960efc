//! 3D rendering surfaces embedded in the page.
//!
//! A surface is a UI node tagged with `SceneSurface`. When the host can
//! render 3D and the window is wide enough, the composer mounts a camera,
//! lights, objects and frame callbacks for it and records them in a
//! `SceneHandle`. Dropping the handle tears all of it down.

/// Placeholder model shown by the floating model surface.
pub mod brain;

/// Render capability probing and the mount/omit decision.
pub mod capability;

/// Surface mounting, teardown and viewport fitting.
pub mod composer;

use bevy::prelude::*;

use crate::engine::reveal::RevealPipeline;
use capability::{RenderCapability, detect_render_capability};
use composer::{
    SceneMounted, SceneSeeds, SceneUnmounted, compose_scenes, fit_scene_viewports,
    follow_surface_reveal, release_scene_handle,
};

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderCapability>()
            .init_resource::<SceneSeeds>()
            .add_event::<SceneMounted>()
            .add_event::<SceneUnmounted>()
            .add_observer(release_scene_handle)
            .add_systems(
                Update,
                (
                    detect_render_capability,
                    compose_scenes,
                    fit_scene_viewports,
                    follow_surface_reveal,
                )
                    .chain()
                    .after(RevealPipeline),
            );
    }
}
