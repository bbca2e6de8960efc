use bevy::prelude::*;

/// Camera of the floating model surface.
pub const MODEL_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 4.0);

/// Camera of the particle backdrop surface.
pub const PARTICLE_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 5.0);

pub const AMBIENT_BRIGHTNESS: f32 = 500.0;

pub const SPOT_LIGHT_POSITION: Vec3 = Vec3::new(10.0, 10.0, 10.0);
pub const SPOT_LIGHT_ANGLE: f32 = 0.15;
pub const SPOT_LIGHT_INTENSITY: f32 = 4_000_000.0;
pub const SPOT_LIGHT_RANGE: f32 = 40.0;

/// Windows narrower than this (logical px) omit every 3D surface.
pub const LG_BREAKPOINT: f32 = 1024.0;

/// Render layers keeping each surface's objects out of the other cameras.
pub const PARTICLE_RENDER_LAYER: usize = 1;
pub const MODEL_RENDER_LAYER: usize = 2;

/// Camera ordering: a clear-only pass, the particle backdrop under the page
/// UI, then the model on top of it.
pub const PAGE_CLEAR_CAMERA_ORDER: isize = -2;
pub const PARTICLE_CAMERA_ORDER: isize = -1;
pub const UI_CAMERA_ORDER: isize = 0;
pub const MODEL_CAMERA_ORDER: isize = 1;

pub const BRAIN_RADIUS: f32 = 1.0;
pub const BRAIN_CORE_COLOUR: Color = Color::srgb(0.39, 0.40, 0.95);
pub const BRAIN_SHELL_COLOUR: Color = Color::srgba(0.93, 0.28, 0.60, 0.35);
