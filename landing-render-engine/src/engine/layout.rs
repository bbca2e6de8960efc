use bevy::prelude::*;

/// Window-space rectangle of a laid out UI node, in physical pixels.
pub fn physical_rect(node: &ComputedNode, transform: &GlobalTransform) -> Rect {
    Rect::from_center_size(transform.translation().truncate(), node.size())
}

/// Window-space rectangle of a laid out UI node, in logical pixels.
pub fn logical_rect(node: &ComputedNode, transform: &GlobalTransform) -> Rect {
    let scale = node.inverse_scale_factor();
    let rect = physical_rect(node, transform);
    Rect::from_corners(rect.min * scale, rect.max * scale)
}

/// True once the layout pass has given the node a non-zero size.
pub fn is_laid_out(node: &ComputedNode) -> bool {
    let size = node.size();
    size.x > 0.0 && size.y > 0.0
}
