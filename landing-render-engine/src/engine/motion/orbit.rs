use bevy::input::mouse::MouseMotion;
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::motion::{ORBIT_PITCH_LIMIT, ORBIT_PITCH_SENSITIVITY, ORBIT_YAW_SENSITIVITY};

use crate::engine::layout::{is_laid_out, logical_rect};

/// Drag-to-rotate pivot of a floating model. Zoom is not supported.
#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitPivot {
    /// UI node whose rectangle accepts drags.
    pub surface: Entity,
    pub yaw: f32,
    pub pitch: f32,
    dragging: bool,
}

impl OrbitPivot {
    pub fn new(surface: Entity) -> Self {
        Self {
            surface,
            yaw: 0.0,
            pitch: 0.0,
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn drag(&mut self, delta: Vec2) {
        self.yaw += delta.x * ORBIT_YAW_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * ORBIT_PITCH_SENSITIVITY)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

pub fn orbit_drag(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    windows: Query<&Window, With<PrimaryWindow>>,
    surfaces: Query<(&ComputedNode, &GlobalTransform)>,
    mut pivots: Query<(&mut OrbitPivot, &mut Transform)>,
) {
    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    let cursor = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position());

    for (mut pivot, mut transform) in &mut pivots {
        if mouse_button.just_pressed(MouseButton::Left) {
            let over_surface = cursor.is_some_and(|cursor| {
                surfaces
                    .get(pivot.surface)
                    .is_ok_and(|(node, global)| {
                        is_laid_out(node) && logical_rect(node, global).contains(cursor)
                    })
            });
            pivot.dragging = over_surface;
        }
        if !mouse_button.pressed(MouseButton::Left) {
            pivot.dragging = false;
        }

        if pivot.dragging && mouse_delta != Vec2::ZERO {
            pivot.drag(mouse_delta);
            transform.rotation = pivot.rotation();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_is_clamped() {
        let mut pivot = OrbitPivot::new(Entity::PLACEHOLDER);
        pivot.drag(Vec2::new(100.0, 10_000.0));
        assert_eq!(pivot.pitch, ORBIT_PITCH_LIMIT);
        assert!((pivot.yaw - 100.0 * ORBIT_YAW_SENSITIVITY).abs() < 1e-6);
        pivot.drag(Vec2::new(0.0, -50_000.0));
        assert_eq!(pivot.pitch, -ORBIT_PITCH_LIMIT);
    }
}
