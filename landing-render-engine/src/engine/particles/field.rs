use bevy::math::EulerRot;
use bevy::prelude::*;
use constants::particles::{
    PARTICLE_COUNT, PARTICLE_DRIFT_AMPLITUDE, PARTICLE_DRIFT_FREQUENCY, PARTICLE_FIELD_RADIUS,
    PARTICLE_SPIN_X, PARTICLE_SPIN_Y,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::{PI, TAU};

/// Population and motion of an ambient particle field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFieldConfig {
    pub count: usize,
    pub radius: f32,
    /// Spin rates around X and Y, radians per second.
    pub spin: Vec2,
    pub drift_amplitude: f32,
    pub drift_frequency: (f32, f32),
}

impl Default for ParticleFieldConfig {
    fn default() -> Self {
        Self {
            count: PARTICLE_COUNT,
            radius: PARTICLE_FIELD_RADIUS,
            spin: Vec2::new(PARTICLE_SPIN_X, PARTICLE_SPIN_Y),
            drift_amplitude: PARTICLE_DRIFT_AMPLITUDE,
            drift_frequency: PARTICLE_DRIFT_FREQUENCY,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    origin: Vec3,
    direction: Vec3,
    phase: f32,
    frequency: f32,
}

/// Fixed population of points, advanced once per frame.
///
/// Positions live in a buffer allocated at spawn and overwritten in place by
/// `advance`, so the hot path never allocates. The field is rotated as a
/// whole through `rotation`; each point additionally breathes along its
/// radius.
#[derive(Component, Debug, Clone)]
pub struct ParticleField {
    config: ParticleFieldConfig,
    seed: u64,
    particles: Vec<Particle>,
    positions: Vec<[f32; 3]>,
    angles: Vec2,
    elapsed: f64,
}

impl ParticleField {
    pub fn spawn(config: ParticleFieldConfig, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let (min_frequency, max_frequency) = config.drift_frequency;

        let particles: Vec<Particle> = (0..config.count)
            .map(|_| {
                let origin = sample_in_sphere(&mut rng) * config.radius;
                let frequency = if max_frequency > min_frequency {
                    rng.random_range(min_frequency..max_frequency)
                } else {
                    min_frequency
                };
                Particle {
                    origin,
                    direction: origin.normalize_or_zero(),
                    phase: rng.random_range(-PI..PI),
                    frequency,
                }
            })
            .collect();
        let positions = particles.iter().map(|p| p.origin.to_array()).collect();

        Self {
            config,
            seed,
            particles,
            positions,
            angles: Vec2::ZERO,
            elapsed: 0.0,
        }
    }

    pub fn config(&self) -> &ParticleFieldConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Current spin of the whole field.
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.angles.x, self.angles.y, 0.0)
    }

    /// Step the field by `delta` seconds. Negative or non-finite steps are
    /// treated as zero.
    pub fn advance(&mut self, delta: f32) {
        let delta = if delta.is_finite() { delta.max(0.0) } else { 0.0 };
        self.elapsed += delta as f64;
        self.angles.x = (self.angles.x - delta * self.config.spin.x).rem_euclid(TAU);
        self.angles.y = (self.angles.y - delta * self.config.spin.y).rem_euclid(TAU);

        let elapsed = self.elapsed;
        let amplitude = self.config.drift_amplitude;
        for (particle, position) in self.particles.iter().zip(self.positions.iter_mut()) {
            let wave = (elapsed * particle.frequency as f64 + particle.phase as f64).sin() as f32;
            *position = (particle.origin + particle.direction * amplitude * wave).to_array();
        }
    }
}

/// Uniform point in the unit ball by rejection sampling.
fn sample_in_sphere(rng: &mut SmallRng) -> Vec3 {
    loop {
        let candidate = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        if candidate.length_squared() <= 1.0 {
            return candidate;
        }
    }
}
