/// Oscillation speed of the hero model. Angle advances at `elapsed / 4 * speed`.
pub const HERO_FLOAT_SPEED: f32 = 4.0;

/// Scale applied to the periodic rotation of the hero model.
pub const HERO_ROTATION_INTENSITY: f32 = 1.0;

/// Scale applied to the periodic vertical float of the hero model.
pub const HERO_FLOAT_INTENSITY: f32 = 2.0;

/// Vertical float range before `float_intensity` is applied.
pub const DEFAULT_FLOATING_RANGE: [f32; 2] = [-0.1, 0.1];

/// Upper bound of the random phase offset given to each floating object.
pub const FLOAT_PHASE_OFFSET_MAX: f32 = 10_000.0;

/// Orbit drag sensitivity in radians per logical pixel.
pub const ORBIT_YAW_SENSITIVITY: f32 = 0.0035;
pub const ORBIT_PITCH_SENSITIVITY: f32 = 0.0030;

/// Pitch clamp for orbit drag (radians).
pub const ORBIT_PITCH_LIMIT: f32 = 1.2;
