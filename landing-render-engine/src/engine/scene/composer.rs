use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::render::camera::{SubCameraView, Viewport};
use bevy::render::view::{NoFrustumCulling, RenderLayers};
use bevy::window::PrimaryWindow;
use constants::motion::FLOAT_PHASE_OFFSET_MAX;
use constants::particles::PARTICLE_COLOUR;
use constants::scene::{
    MODEL_CAMERA_ORDER, MODEL_CAMERA_POSITION, MODEL_RENDER_LAYER, PARTICLE_CAMERA_ORDER,
    PARTICLE_CAMERA_POSITION, PARTICLE_RENDER_LAYER, SPOT_LIGHT_ANGLE, SPOT_LIGHT_INTENSITY,
    SPOT_LIGHT_POSITION, SPOT_LIGHT_RANGE,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::brain::spawn_brain_model;
use super::capability::{RenderCapability, SurfaceDecision};
use crate::engine::frame::scheduler::{FrameCallbackHandle, FrameRepeat, FrameScheduler};
use crate::engine::layout::{is_laid_out, physical_rect};
use crate::engine::motion::float_motion::{
    FloatModulator, FloatingObject, MotionParams, float_frame,
};
use crate::engine::motion::orbit::OrbitPivot;
use crate::engine::particles::field::{ParticleField, ParticleFieldConfig};
use crate::engine::particles::mesh::{create_particle_mesh, particle_frame};
use crate::engine::reveal::state::RevealEntry;

/// Kind of 3D content a surface hosts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceKind {
    FloatingModel { motion: MotionParams },
    ParticleBackdrop,
}

impl SurfaceKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FloatingModel { .. } => "floating_model",
            Self::ParticleBackdrop => "particle_backdrop",
        }
    }
}

/// UI node that hosts a 3D surface when the host can render one.
#[derive(Component, Debug, Clone, Copy)]
pub struct SceneSurface {
    pub kind: SurfaceKind,
    pub enabled: bool,
}

impl SceneSurface {
    pub fn floating_model(motion: MotionParams, enabled: bool) -> Self {
        Self {
            kind: SurfaceKind::FloatingModel { motion },
            enabled,
        }
    }

    pub fn particle_backdrop(enabled: bool) -> Self {
        Self {
            kind: SurfaceKind::ParticleBackdrop,
            enabled,
        }
    }
}

/// Everything one mounted surface owns. Removing this component (directly
/// or by despawning the surface node) cancels the callbacks and despawns the
/// entities in the same frame.
#[derive(Component, Debug)]
pub struct SceneHandle {
    kind: SurfaceKind,
    camera: Entity,
    pivot: Option<Entity>,
    entities: Vec<Entity>,
    callbacks: Vec<FrameCallbackHandle>,
}

impl SceneHandle {
    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn camera(&self) -> Entity {
        self.camera
    }

    /// Transform the surface intro scale is applied to.
    pub fn pivot(&self) -> Option<Entity> {
        self.pivot
    }

    pub fn callbacks(&self) -> &[FrameCallbackHandle] {
        &self.callbacks
    }
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SceneMounted {
    pub surface: Entity,
    pub kind: SurfaceKind,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct SceneUnmounted {
    pub surface: Entity,
    pub kind: SurfaceKind,
}

/// Seeds for particle fields and float phases. Every mount draws new ones.
#[derive(Resource)]
pub struct SceneSeeds(SmallRng);

impl Default for SceneSeeds {
    fn default() -> Self {
        Self(SmallRng::seed_from_u64(0x1A4D_1E6E_5EED_0001))
    }
}

impl SceneSeeds {
    pub fn next_seed(&mut self) -> u64 {
        self.0.random()
    }

    pub fn next_phase(&mut self) -> f32 {
        self.0.random_range(0.0..FLOAT_PHASE_OFFSET_MAX)
    }
}

/// Creates and tears down the camera, lights, objects and frame callbacks
/// of a 3D surface.
#[derive(SystemParam)]
pub struct SceneComposer<'w, 's> {
    commands: Commands<'w, 's>,
    scheduler: ResMut<'w, FrameScheduler>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    seeds: ResMut<'w, SceneSeeds>,
}

impl SceneComposer<'_, '_> {
    pub fn mount(&mut self, surface: Entity, kind: SurfaceKind) -> SceneHandle {
        match kind {
            SurfaceKind::FloatingModel { motion } => self.mount_floating_model(surface, motion),
            SurfaceKind::ParticleBackdrop => {
                self.mount_particle_backdrop(ParticleFieldConfig::default())
            }
        }
    }

    /// Camera, ambient spot light and the placeholder model floating inside
    /// an orbit pivot.
    pub fn mount_floating_model(&mut self, surface: Entity, motion: MotionParams) -> SceneHandle {
        let layers = RenderLayers::layer(MODEL_RENDER_LAYER);
        let camera = self.spawn_camera(MODEL_CAMERA_ORDER, MODEL_CAMERA_POSITION, layers.clone());

        let light = self
            .commands
            .spawn((
                SpotLight {
                    intensity: SPOT_LIGHT_INTENSITY,
                    range: SPOT_LIGHT_RANGE,
                    outer_angle: SPOT_LIGHT_ANGLE,
                    inner_angle: 0.0,
                    ..default()
                },
                Transform::from_translation(SPOT_LIGHT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
                layers.clone(),
            ))
            .id();

        let pivot = self
            .commands
            .spawn((
                OrbitPivot::new(surface),
                Transform::default(),
                Visibility::default(),
                layers.clone(),
            ))
            .id();

        let model = spawn_brain_model(
            &mut self.commands,
            &mut self.meshes,
            &mut self.materials,
            pivot,
            layers,
        );
        let modulator = FloatModulator::new(motion, self.seeds.next_phase());
        self.commands.entity(model).insert(FloatingObject {
            modulator,
            rest: Transform::default(),
        });

        let callback = self
            .scheduler
            .schedule(FrameRepeat::EachFrame, move |tick, world| {
                float_frame(model, tick, world);
            });

        SceneHandle {
            kind: SurfaceKind::FloatingModel { motion },
            camera,
            pivot: Some(pivot),
            entities: vec![camera, light, pivot],
            callbacks: vec![callback],
        }
    }

    /// Camera and a freshly seeded particle field.
    pub fn mount_particle_backdrop(&mut self, config: ParticleFieldConfig) -> SceneHandle {
        let layers = RenderLayers::layer(PARTICLE_RENDER_LAYER);
        let camera =
            self.spawn_camera(PARTICLE_CAMERA_ORDER, PARTICLE_CAMERA_POSITION, layers.clone());

        let field = ParticleField::spawn(config, self.seeds.next_seed());
        let mesh = self.meshes.add(create_particle_mesh(field.positions()));
        let material = self.materials.add(StandardMaterial {
            base_color: PARTICLE_COLOUR,
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        let points = self
            .commands
            .spawn((
                field,
                Mesh3d(mesh),
                MeshMaterial3d(material),
                Transform::default(),
                NoFrustumCulling,
                layers,
            ))
            .id();

        let callback = self
            .scheduler
            .schedule(FrameRepeat::EachFrame, move |tick, world| {
                particle_frame(points, tick, world);
            });

        SceneHandle {
            kind: SurfaceKind::ParticleBackdrop,
            camera,
            pivot: None,
            entities: vec![camera, points],
            callbacks: vec![callback],
        }
    }

    fn spawn_camera(&mut self, order: isize, position: Vec3, layers: RenderLayers) -> Entity {
        self.commands
            .spawn((
                Camera3d::default(),
                Camera {
                    order,
                    clear_color: ClearColorConfig::None,
                    is_active: false,
                    ..default()
                },
                Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
                layers,
            ))
            .id()
    }
}

/// Mount surfaces whose decision says `Mount`, unmount the ones that flipped
/// to `Omit`.
pub fn compose_scenes(
    capability: Res<RenderCapability>,
    windows: Query<&Window, With<PrimaryWindow>>,
    surfaces: Query<(Entity, &SceneSurface, Has<SceneHandle>)>,
    mut composer: SceneComposer,
    mut mounted: EventWriter<SceneMounted>,
) {
    let window_width = windows.single().map_or(0.0, |window| window.width());

    for (surface, scene, is_mounted) in &surfaces {
        let decision = SurfaceDecision::evaluate(*capability, window_width, scene.enabled);
        match (decision, is_mounted) {
            (SurfaceDecision::Mount, false) => {
                let handle = composer.mount(surface, scene.kind);
                composer.commands.entity(surface).insert(handle);
                info!("Mounted {} surface on {surface}", scene.kind.name());
                mounted.write(SceneMounted {
                    surface,
                    kind: scene.kind,
                });
            }
            (SurfaceDecision::Omit, true) => {
                composer.commands.entity(surface).remove::<SceneHandle>();
            }
            _ => {}
        }
    }
}

/// Release everything a surface owned the moment its handle goes away.
pub fn release_scene_handle(
    trigger: Trigger<OnRemove, SceneHandle>,
    handles: Query<&SceneHandle>,
    mut scheduler: ResMut<FrameScheduler>,
    mut commands: Commands,
    mut unmounted: EventWriter<SceneUnmounted>,
) {
    let surface = trigger.target();
    let Ok(handle) = handles.get(surface) else {
        return;
    };
    for callback in &handle.callbacks {
        scheduler.cancel(*callback);
    }
    for entity in &handle.entities {
        if let Ok(mut entity_commands) = commands.get_entity(*entity) {
            entity_commands.despawn();
        }
    }
    info!("Unmounted {} surface on {surface}", handle.kind.name());
    unmounted.write(SceneUnmounted {
        surface,
        kind: handle.kind,
    });
}

/// Point each surface camera at its node's on-screen rectangle. Parts of
/// the node outside the window are cropped, and cameras of nodes that are
/// entirely off screen are switched off.
pub fn fit_scene_viewports(
    windows: Query<&Window, With<PrimaryWindow>>,
    surfaces: Query<(&ComputedNode, &GlobalTransform, &SceneHandle)>,
    mut cameras: Query<&mut Camera>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let window_size = window.physical_size().as_vec2();

    for (node, transform, handle) in &surfaces {
        let Ok(mut camera) = cameras.get_mut(handle.camera) else {
            continue;
        };
        let full = physical_rect(node, transform);
        let visible = Rect::from_corners(
            full.min.clamp(Vec2::ZERO, window_size),
            full.max.clamp(Vec2::ZERO, window_size),
        );

        if !is_laid_out(node) || visible.width() < 1.0 || visible.height() < 1.0 {
            if camera.is_active {
                camera.is_active = false;
            }
            continue;
        }

        let viewport = Viewport {
            physical_position: visible.min.as_uvec2(),
            physical_size: visible.size().as_uvec2().max(UVec2::ONE),
            ..default()
        };
        let sub_view = SubCameraView {
            full_size: full.size().as_uvec2().max(UVec2::ONE),
            offset: visible.min - full.min,
            size: viewport.physical_size,
        };
        if !camera.is_active || !camera_matches(&camera, &viewport, &sub_view) {
            camera.is_active = true;
            camera.viewport = Some(viewport);
            camera.sub_camera_view = Some(sub_view);
        }
    }
}

fn camera_matches(camera: &Camera, viewport: &Viewport, sub_view: &SubCameraView) -> bool {
    let viewport_matches = camera.viewport.as_ref().is_some_and(|current| {
        current.physical_position == viewport.physical_position
            && current.physical_size == viewport.physical_size
    });
    let sub_view_matches = camera.sub_camera_view.as_ref().is_some_and(|current| {
        current.full_size == sub_view.full_size
            && current.offset == sub_view.offset
            && current.size == sub_view.size
    });
    viewport_matches && sub_view_matches
}

/// Scale each model pivot with the intro animation of its surface node.
pub fn follow_surface_reveal(
    time: Res<Time>,
    surfaces: Query<(&RevealEntry, &SceneHandle)>,
    mut transforms: Query<&mut Transform>,
) {
    let now = time.elapsed();
    for (entry, handle) in &surfaces {
        let Some(pivot) = handle.pivot else {
            continue;
        };
        let Ok(mut transform) = transforms.get_mut(pivot) else {
            continue;
        };
        let scale = Vec3::splat(entry.style_at(now).scale);
        if transform.scale != scale {
            transform.scale = scale;
        }
    }
}
