//! One-shot entrance animations.
//!
//! Each revealed element carries a `RevealEntry`. Mount-triggered entries fire
//! as soon as they exist; viewport-triggered ones fire the first time an
//! `IntersectionSource` reports them on screen. Once fired, an entry only
//! moves forward to `Revealed`; later samples are ignored.

/// Staggered groups and the delay of each declared member.
pub mod group;

/// Viewport intersection samples and the layout-backed source.
pub mod intersection;

/// Reveal phases, styles and the per-element state machine.
pub mod state;

/// Systems firing, advancing and applying reveals.
pub mod systems;

use bevy::prelude::*;

use crate::engine::motion::hover::step_hover_motion;
use crate::engine::scroll::ScrollPipeline;
use systems::{
    RevealCompleted, RevealFired, advance_reveals, apply_reveal_offsets, apply_reveal_opacity,
    mount_reveals, observe_reveal_targets,
};

/// Ordering of the reveal systems within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealPipeline;

pub struct RevealPlugin;

impl Plugin for RevealPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RevealFired>()
            .add_event::<RevealCompleted>()
            .add_systems(
                Update,
                (
                    mount_reveals,
                    observe_reveal_targets,
                    advance_reveals,
                    (apply_reveal_offsets, apply_reveal_opacity),
                )
                    .chain()
                    .in_set(RevealPipeline)
                    .after(ScrollPipeline)
                    .after(step_hover_motion),
            );
    }
}
