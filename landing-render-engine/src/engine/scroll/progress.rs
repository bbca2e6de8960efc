use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::anchor::{ContainerExtent, ScrollAnchor};
use super::page_scroll::{PageScroll, page_top};
use crate::engine::layout::{is_laid_out, logical_rect};

/// Normalised scroll position within an anchor range. Always in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Progress(f32);

impl Progress {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);

    /// Clamp into [0, 1]. NaN collapses to zero.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

/// Converts a raw scroll offset into progress over a bound anchor.
pub struct ProgressSampler;

impl ProgressSampler {
    /// Progress of `scroll_offset` over the anchor's start/end offsets.
    /// Returns `None` while the container has no layout.
    pub fn sample(
        anchor: &ScrollAnchor,
        container: Option<ContainerExtent>,
        scroll_offset: f32,
        viewport_height: f32,
    ) -> Option<Progress> {
        let container = container?;
        let start = anchor.start().scroll_offset(container, viewport_height);
        let end = anchor.end().scroll_offset(container, viewport_height);

        if (end - start).abs() <= f32::EPSILON {
            return Some(if scroll_offset < end {
                Progress::ZERO
            } else {
                Progress::ONE
            });
        }

        Some(Progress::new((scroll_offset - start) / (end - start)))
    }
}

/// Progress of the anchor on the same entity for the current frame only.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct ScrollProgress {
    pub current: Option<Progress>,
}

/// Recompute every anchor from the live scroll position. Runs every frame, no
/// debouncing; nothing is carried over from the previous frame.
pub fn sample_scroll_progress(
    page_scroll: Res<PageScroll>,
    windows: Query<&Window, With<PrimaryWindow>>,
    containers: Query<(&ComputedNode, &GlobalTransform)>,
    mut anchors: Query<(&ScrollAnchor, &mut ScrollProgress)>,
) {
    let viewport_height = windows
        .single()
        .map(|window| window.height())
        .unwrap_or(page_scroll.viewport_height());

    for (anchor, mut progress) in &mut anchors {
        let extent = containers
            .get(anchor.container())
            .ok()
            .filter(|(node, _)| is_laid_out(node))
            .map(|(node, transform)| ContainerExtent {
                top: page_top(node, transform, &page_scroll),
                height: logical_rect(node, transform).height(),
            });

        progress.current =
            ProgressSampler::sample(anchor, extent, page_scroll.offset(), viewport_height);
    }
}
