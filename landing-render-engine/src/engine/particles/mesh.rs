use bevy::prelude::*;
use bevy::render::mesh::{PrimitiveTopology, VertexAttributeValues};
use bevy::render::render_asset::RenderAssetUsages;

use super::field::ParticleField;
use crate::engine::frame::scheduler::FrameTick;

/// Point list mesh for a particle field. Kept in the main world so the
/// positions can be rewritten every frame.
pub fn create_particle_mesh(positions: &[[f32; 3]]) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions.to_vec());
    mesh
}

/// Overwrite the position attribute in place. Falls back to replacing the
/// attribute if the existing buffer has a different shape.
pub fn write_particle_positions(mesh: &mut Mesh, positions: &[[f32; 3]]) {
    if let Some(VertexAttributeValues::Float32x3(values)) =
        mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION)
    {
        if values.len() == positions.len() {
            values.copy_from_slice(positions);
            return;
        }
    }
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions.to_vec());
}

/// Frame callback body: advance the field on `entity`, spin its transform
/// and push the new positions into its mesh. Does nothing once the entity
/// is gone.
pub fn particle_frame(entity: Entity, tick: &FrameTick, world: &mut World) {
    let Ok(mut entity_mut) = world.get_entity_mut(entity) else {
        return;
    };
    let Some(mut field) = entity_mut.get_mut::<ParticleField>() else {
        return;
    };
    field.advance(tick.delta);
    let rotation = field.rotation();

    if let Some(mut transform) = entity_mut.get_mut::<Transform>() {
        transform.rotation = rotation;
    }
    let Some(handle) = entity_mut.get::<Mesh3d>().map(|mesh| mesh.0.clone()) else {
        return;
    };

    if !world.contains_resource::<Assets<Mesh>>() {
        return;
    }
    world.resource_scope(|world, mut meshes: Mut<Assets<Mesh>>| {
        let Some(field) = world.get::<ParticleField>(entity) else {
            return;
        };
        if let Some(mesh) = meshes.get_mut(&handle) {
            write_particle_positions(mesh, field.positions());
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::particles::field::ParticleFieldConfig;

    fn positions(mesh: &Mesh) -> Vec<[f32; 3]> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(values)) => values.clone(),
            _ => Vec::new(),
        }
    }

    #[test]
    fn positions_are_rewritten_in_place() {
        let mut mesh = create_particle_mesh(&[[0.0; 3]; 4]);
        let next = [[1.0, 2.0, 3.0]; 4];
        write_particle_positions(&mut mesh, &next);
        assert_eq!(positions(&mesh), next.to_vec());
    }

    #[test]
    fn frame_advances_the_field_and_its_mesh() {
        let mut world = World::new();
        world.init_resource::<Assets<Mesh>>();
        let field = ParticleField::spawn(ParticleFieldConfig::default(), 9);
        let handle = world
            .resource_mut::<Assets<Mesh>>()
            .add(create_particle_mesh(field.positions()));
        let entity = world
            .spawn((field, Mesh3d(handle.clone()), Transform::default()))
            .id();

        let tick = FrameTick {
            elapsed: 0.5,
            delta: 0.5,
            frame: 1,
        };
        particle_frame(entity, &tick, &mut world);

        let field = world.get::<ParticleField>(entity).unwrap();
        let meshes = world.resource::<Assets<Mesh>>();
        assert_eq!(positions(meshes.get(&handle).unwrap()), field.positions());
        assert_ne!(
            world.get::<Transform>(entity).unwrap().rotation,
            Quat::IDENTITY
        );
    }

    #[test]
    fn frame_on_missing_entity_is_discarded() {
        let mut world = World::new();
        let entity = world.spawn_empty().id();
        world.despawn(entity);
        let tick = FrameTick {
            elapsed: 0.0,
            delta: 0.016,
            frame: 1,
        };
        particle_frame(entity, &tick, &mut world);
    }
}
