//! Scroll-driven layout motion.
//!
//! Samples the page scroll position against per-section anchors and maps the
//! resulting progress onto visual parameters.

/// Anchor edges and the immutable scroll range bound to a container.
pub mod anchor;

/// Page scroll state, input handling and the scrolling root node.
pub mod page_scroll;

/// Maps progress onto output ranges and applies parallax offsets.
pub mod parallax;

/// Progress sampling over a bound anchor.
pub mod progress;

use bevy::prelude::*;

use page_scroll::{
    PageScroll, PageScrolled, apply_page_scroll, read_scroll_input, track_page_extent,
};
use parallax::apply_parallax_offsets;
use progress::sample_scroll_progress;

/// Ordering of the scroll pipeline within `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollPipeline;

pub struct ScrollPlugin;

impl Plugin for ScrollPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PageScroll>()
            .add_event::<PageScrolled>()
            .add_systems(
                Update,
                (
                    track_page_extent,
                    read_scroll_input,
                    sample_scroll_progress,
                    apply_parallax_offsets,
                    apply_page_scroll,
                )
                    .chain()
                    .in_set(ScrollPipeline),
            );
    }
}
