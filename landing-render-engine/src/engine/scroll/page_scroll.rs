use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::layout::{SCROLL_LINE_PX, SCROLL_PAGE_FRACTION};

use crate::engine::layout::{is_laid_out, logical_rect};

/// Root node of the scrollable page. Its `top` is driven by `PageScroll`.
#[derive(Component)]
pub struct PageRoot;

/// Vertical scroll state of the whole page, in logical pixels.
#[derive(Resource, Debug, Clone)]
pub struct PageScroll {
    offset: f32,
    layout_offset: f32,
    viewport_height: f32,
    content_height: f32,
}

impl Default for PageScroll {
    fn default() -> Self {
        Self {
            offset: 0.0,
            layout_offset: 0.0,
            viewport_height: 720.0,
            content_height: 720.0,
        }
    }
}

impl PageScroll {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Offset the current layout was computed with (one frame behind `offset`).
    pub fn layout_offset(&self) -> f32 {
        self.layout_offset
    }

    pub fn viewport_height(&self) -> f32 {
        self.viewport_height
    }

    pub fn max_offset(&self) -> f32 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.scroll_to(self.offset + delta);
    }

    pub fn scroll_to(&mut self, offset: f32) {
        if offset.is_finite() {
            self.offset = offset.clamp(0.0, self.max_offset());
        }
    }

    pub fn set_extent(&mut self, viewport_height: f32, content_height: f32) {
        self.viewport_height = viewport_height.max(0.0);
        self.content_height = content_height.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }
}

/// Fired for every scroll notification that moved the page.
#[derive(Event, Debug, Clone, Copy)]
pub struct PageScrolled {
    pub offset: f32,
}

/// Mouse wheel and page keys. Hosts embedding the canvas scroll through the
/// `scroll_to` RPC method instead.
pub fn read_scroll_input(
    mut wheel: EventReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut page_scroll: ResMut<PageScroll>,
    mut scrolled: EventWriter<PageScrolled>,
) {
    let before = page_scroll.offset();

    for event in wheel.read() {
        let delta = match event.unit {
            MouseScrollUnit::Line => event.y * SCROLL_LINE_PX,
            MouseScrollUnit::Pixel => event.y,
        };
        page_scroll.scroll_by(-delta);
    }

    let page = page_scroll.viewport_height() * SCROLL_PAGE_FRACTION;
    if keyboard.just_pressed(KeyCode::PageDown) || keyboard.just_pressed(KeyCode::Space) {
        page_scroll.scroll_by(page);
    }
    if keyboard.just_pressed(KeyCode::PageUp) {
        page_scroll.scroll_by(-page);
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        page_scroll.scroll_by(SCROLL_LINE_PX);
    }
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        page_scroll.scroll_by(-SCROLL_LINE_PX);
    }
    if keyboard.just_pressed(KeyCode::Home) {
        page_scroll.scroll_to(0.0);
    }
    if keyboard.just_pressed(KeyCode::End) {
        let end = page_scroll.max_offset();
        page_scroll.scroll_to(end);
    }

    if page_scroll.offset() != before {
        scrolled.write(PageScrolled {
            offset: page_scroll.offset(),
        });
    }
}

/// Keep the scroll range in sync with the window and the laid out page.
pub fn track_page_extent(
    windows: Query<&Window, With<PrimaryWindow>>,
    roots: Query<&ComputedNode, With<PageRoot>>,
    mut page_scroll: ResMut<PageScroll>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let content_height = roots
        .iter()
        .filter(|node| is_laid_out(node))
        .map(|node| node.size().y * node.inverse_scale_factor())
        .fold(0.0, f32::max);

    let viewport_height = window.height();
    if page_scroll.viewport_height() != viewport_height
        || page_scroll.content_height != content_height
    {
        page_scroll.set_extent(viewport_height, content_height);
    }
}

/// Move the page root by the current offset.
pub fn apply_page_scroll(
    mut page_scroll: ResMut<PageScroll>,
    mut roots: Query<&mut Node, With<PageRoot>>,
) {
    let top = Val::Px(-page_scroll.offset());
    for mut node in &mut roots {
        if node.top != top {
            node.top = top;
        }
    }
    if page_scroll.layout_offset != page_scroll.offset {
        page_scroll.layout_offset = page_scroll.offset;
    }
}

/// Logical-pixel rectangle of the viewport.
pub fn viewport_rect(window: &Window) -> Rect {
    Rect::new(0.0, 0.0, window.width(), window.height())
}

/// Helper for systems that need a node's page-space top.
pub fn page_top(node: &ComputedNode, transform: &GlobalTransform, scroll: &PageScroll) -> f32 {
    logical_rect(node, transform).min.y + scroll.layout_offset()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_stays_within_content() {
        let mut scroll = PageScroll::default();
        scroll.set_extent(800.0, 2000.0);
        scroll.scroll_by(5000.0);
        assert_eq!(scroll.offset(), 1200.0);
        scroll.scroll_by(-9000.0);
        assert_eq!(scroll.offset(), 0.0);
        scroll.scroll_to(f32::NAN);
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn shrinking_content_pulls_offset_back() {
        let mut scroll = PageScroll::default();
        scroll.set_extent(800.0, 3000.0);
        scroll.scroll_to(2000.0);
        scroll.set_extent(800.0, 1000.0);
        assert_eq!(scroll.offset(), 200.0);
    }

    #[test]
    fn short_pages_do_not_scroll() {
        let mut scroll = PageScroll::default();
        scroll.set_extent(900.0, 600.0);
        scroll.scroll_by(100.0);
        assert_eq!(scroll.offset(), 0.0);
    }
}
