use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::layout::{is_laid_out, logical_rect};
use crate::engine::scroll::page_scroll::viewport_rect;

/// Visibility of an element relative to the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSample {
    pub is_intersecting: bool,
    /// Visible fraction of the element's area, in [0, 1].
    pub ratio: f32,
}

impl IntersectionSample {
    /// Overlap of `element` with `viewport`. Touching edges count as
    /// intersecting with a ratio of zero.
    pub fn between(element: Rect, viewport: Rect) -> Self {
        let min = element.min.max(viewport.min);
        let max = element.max.min(viewport.max);
        let overlap = max - min;
        let is_intersecting = overlap.x >= 0.0 && overlap.y >= 0.0;

        let area = element.width() * element.height();
        let ratio = if !is_intersecting {
            0.0
        } else if area <= 0.0 {
            1.0
        } else {
            (overlap.x * overlap.y / area).clamp(0.0, 1.0)
        };

        Self {
            is_intersecting,
            ratio,
        }
    }
}

/// Source of viewport intersection samples for page elements.
pub trait IntersectionSource {
    /// `None` while the element has no layout (or no longer exists).
    fn observe(&self, element: Entity) -> Option<IntersectionSample>;
}

/// Intersections computed from the UI layout against the primary window.
#[derive(SystemParam)]
pub struct LayoutIntersections<'w, 's> {
    windows: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    nodes: Query<'w, 's, (&'static ComputedNode, &'static GlobalTransform)>,
}

impl IntersectionSource for LayoutIntersections<'_, '_> {
    fn observe(&self, element: Entity) -> Option<IntersectionSample> {
        let window = self.windows.single().ok()?;
        let (node, transform) = self.nodes.get(element).ok()?;
        if !is_laid_out(node) {
            return None;
        }
        Some(IntersectionSample::between(
            logical_rect(node, transform),
            viewport_rect(window),
        ))
    }
}
