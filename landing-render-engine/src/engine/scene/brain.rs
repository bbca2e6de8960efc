//! Placeholder floating model: a solid core inside a translucent shell.

use bevy::prelude::*;
use bevy::render::view::RenderLayers;
use constants::scene::{BRAIN_CORE_COLOUR, BRAIN_RADIUS, BRAIN_SHELL_COLOUR};

#[derive(Component)]
pub struct BrainModel;

/// Spawn the model under `parent`. Returns the model root, the entity the
/// float motion drives.
pub fn spawn_brain_model(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    parent: Entity,
    layers: RenderLayers,
) -> Entity {
    let core_material = materials.add(StandardMaterial {
        base_color: BRAIN_CORE_COLOUR,
        perceptual_roughness: 0.35,
        metallic: 0.1,
        ..default()
    });
    let shell_material = materials.add(StandardMaterial {
        base_color: BRAIN_SHELL_COLOUR,
        alpha_mode: AlphaMode::Blend,
        perceptual_roughness: 0.2,
        ..default()
    });

    let core_mesh = meshes.add(
        Sphere::new(BRAIN_RADIUS * 0.72)
            .mesh()
            .ico(4)
            .unwrap_or_else(|_| Sphere::new(BRAIN_RADIUS * 0.72).mesh().uv(32, 18)),
    );
    let shell_mesh = meshes.add(Sphere::new(BRAIN_RADIUS).mesh().uv(48, 24));

    commands
        .spawn((
            BrainModel,
            Transform::default(),
            Visibility::default(),
            layers.clone(),
            ChildOf(parent),
        ))
        .with_children(|model| {
            model.spawn((
                Mesh3d(core_mesh),
                MeshMaterial3d(core_material),
                Transform::default(),
                layers.clone(),
            ));
            model.spawn((
                Mesh3d(shell_mesh),
                MeshMaterial3d(shell_material),
                Transform::default(),
                layers,
            ));
        })
        .id()
}
