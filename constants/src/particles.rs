use bevy::prelude::*;

/// Population of the ambient particle field.
pub const PARTICLE_COUNT: usize = 1_666;

/// Radius of the sphere particles are sampled in.
pub const PARTICLE_FIELD_RADIUS: f32 = 1.5;

/// Field spin (radians per second) around X and Y.
pub const PARTICLE_SPIN_X: f32 = 1.0 / 10.0;
pub const PARTICLE_SPIN_Y: f32 = 1.0 / 15.0;

/// Radial drift amplitude of a single particle.
pub const PARTICLE_DRIFT_AMPLITUDE: f32 = 0.02;

/// Range of per-particle drift frequencies (radians per second).
pub const PARTICLE_DRIFT_FREQUENCY: (f32, f32) = (0.3, 1.2);

pub const PARTICLE_COLOUR: Color = Color::srgba(0.39, 0.40, 0.95, 0.8);
