use bevy::prelude::*;
use constants::motion::{
    DEFAULT_FLOATING_RANGE, HERO_FLOAT_INTENSITY, HERO_FLOAT_SPEED, HERO_ROTATION_INTENSITY,
};
use serde::{Deserialize, Serialize};

use crate::engine::frame::scheduler::FrameTick;

/// Static configuration of a floating object. Never mutated per frame.
/// Fields missing from a config take the hero values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default = "MotionParams::hero")]
pub struct MotionParams {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
    pub floating_range: [f32; 2],
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            speed: 1.0,
            rotation_intensity: 1.0,
            float_intensity: 1.0,
            floating_range: DEFAULT_FLOATING_RANGE,
        }
    }
}

impl MotionParams {
    /// Parameters of the hero model.
    pub fn hero() -> Self {
        Self {
            speed: HERO_FLOAT_SPEED,
            rotation_intensity: HERO_ROTATION_INTENSITY,
            float_intensity: HERO_FLOAT_INTENSITY,
            floating_range: DEFAULT_FLOATING_RANGE,
        }
    }

    pub fn is_valid(&self) -> bool {
        [
            self.speed,
            self.rotation_intensity,
            self.float_intensity,
            self.floating_range[0],
            self.floating_range[1],
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.speed >= 0.0
    }
}

/// Offset from an object's rest pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseDelta {
    pub translation: Vec3,
    pub rotation: Vec3,
}

impl PoseDelta {
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    /// Rest pose moved by this delta. Scale is left untouched.
    pub fn applied_to(&self, rest: &Transform, current_scale: Vec3) -> Transform {
        Transform {
            translation: rest.translation + self.translation,
            rotation: rest.rotation * self.rotation_quat(),
            scale: current_scale,
        }
    }
}

/// Periodic float and sway derived straight from elapsed time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatModulator {
    params: MotionParams,
    phase_offset: f64,
}

impl FloatModulator {
    pub fn new(params: MotionParams, phase_offset: f32) -> Self {
        Self {
            params,
            phase_offset: phase_offset as f64,
        }
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    /// Pose delta at `elapsed` seconds. The angle is computed in f64 from the
    /// elapsed time itself, so nothing drifts over long sessions.
    pub fn pose_at(&self, elapsed: f64) -> PoseDelta {
        let angle = (elapsed + self.phase_offset) / 4.0 * self.params.speed as f64;
        let (sin, cos) = (angle.sin() as f32, angle.cos() as f32);
        let intensity = self.params.rotation_intensity;

        let raw_float = sin / 10.0;
        let [low, high] = self.params.floating_range;
        let float = low + (raw_float + 0.1) / 0.2 * (high - low);

        PoseDelta {
            translation: Vec3::new(0.0, float * self.params.float_intensity, 0.0),
            rotation: Vec3::new(
                cos / 8.0 * intensity,
                sin / 8.0 * intensity,
                sin / 20.0 * intensity,
            ),
        }
    }
}

/// A 3D object oscillating around its rest pose.
#[derive(Component, Debug, Clone, Copy)]
pub struct FloatingObject {
    pub modulator: FloatModulator,
    pub rest: Transform,
}

/// Frame callback body: move `entity` to its pose for this tick. Does
/// nothing when the entity or its components are gone.
pub fn float_frame(entity: Entity, tick: &FrameTick, world: &mut World) {
    let Ok(mut entity_mut) = world.get_entity_mut(entity) else {
        return;
    };
    let Some(floating) = entity_mut.get::<FloatingObject>().copied() else {
        return;
    };
    let Some(mut transform) = entity_mut.get_mut::<Transform>() else {
        return;
    };
    let pose = floating.modulator.pose_at(tick.elapsed);
    let scale = transform.scale;
    *transform = pose.applied_to(&floating.rest, scale);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_is_deterministic_in_time_and_params() {
        let a = FloatModulator::new(MotionParams::hero(), 12.5);
        let b = FloatModulator::new(MotionParams::hero(), 12.5);
        for t in [0.0, 0.016, 1.0, 3600.0, 86_400.5] {
            assert_eq!(a.pose_at(t), b.pose_at(t));
        }
    }

    #[test]
    fn amplitude_is_bounded_by_intensities() {
        let params = MotionParams::hero();
        let modulator = FloatModulator::new(params, 0.0);
        for step in 0..2_000 {
            let pose = modulator.pose_at(step as f64 * 0.037);
            assert!(pose.translation.y.abs() <= 0.1 * params.float_intensity + 1e-5);
            assert!(pose.rotation.x.abs() <= params.rotation_intensity / 8.0 + 1e-6);
            assert!(pose.rotation.z.abs() <= params.rotation_intensity / 20.0 + 1e-6);
        }
    }

    #[test]
    fn zero_intensity_holds_the_rest_pose() {
        let params = MotionParams {
            rotation_intensity: 0.0,
            float_intensity: 0.0,
            ..MotionParams::hero()
        };
        let pose = FloatModulator::new(params, 3.0).pose_at(42.0);
        assert_eq!(pose.translation, Vec3::ZERO);
        assert_eq!(pose.rotation, Vec3::ZERO);
    }

    #[test]
    fn period_matches_speed() {
        // Angle advances at speed / 4 rad/s, so one cycle takes 8*pi/speed seconds.
        let modulator = FloatModulator::new(MotionParams::hero(), 0.0);
        let period = 8.0 * std::f64::consts::PI / 4.0;
        let a = modulator.pose_at(1.3);
        let b = modulator.pose_at(1.3 + period);
        assert!((a.translation.y - b.translation.y).abs() < 1e-5);
        assert!((a.rotation.y - b.rotation.y).abs() < 1e-5);
    }

    #[test]
    fn frame_on_missing_entity_is_discarded() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        world.despawn(entity);
        let tick = FrameTick {
            elapsed: 1.0,
            delta: 0.016,
            frame: 1,
        };
        float_frame(entity, &tick, &mut world);
    }

    #[test]
    fn frame_keeps_scale_and_moves_around_rest() {
        let mut world = World::new();
        let rest = Transform::from_xyz(0.0, 1.0, 0.0);
        let entity = world
            .spawn((
                rest.with_scale(Vec3::splat(1.25)),
                FloatingObject {
                    modulator: FloatModulator::new(MotionParams::hero(), 0.0),
                    rest,
                },
            ))
            .id();
        let tick = FrameTick {
            elapsed: 2.0,
            delta: 0.016,
            frame: 1,
        };
        float_frame(entity, &tick, &mut world);
        let transform = world.get::<Transform>(entity).unwrap();
        assert_eq!(transform.scale, Vec3::splat(1.25));
        assert!((transform.translation.y - 1.0).abs() <= 0.2 + 1e-5);
    }
}
