//! World systems
//!
//! Spawning the layout's primitives, their static colliders, lights and sky.

use bevy::prelude::*;
use bevy::render::render_resource::Face;
use bevy_rapier3d::prelude::Collider;
use std::collections::HashMap;

use shared::{LightPlacement, Primitive, Rgb, SceneLayout};

use crate::ActiveLayout;

/// Reach of indoor point lights
const POINT_LIGHT_RANGE: f32 = 50.0;

const PLANE_COLLIDER_HALF_THICKNESS: f32 = 0.001;

// =============================================================================
// COMPONENTS
// =============================================================================

/// Root entity for all layout visuals
#[derive(Component)]
pub struct LayoutRoot;

/// Index of the placement a spawned piece came from
#[derive(Component, Clone, Copy, Debug)]
pub struct LayoutPiece(pub usize);

// =============================================================================
// SPAWNING
// =============================================================================

/// Unit mesh for a primitive (scaled by the piece transform).
pub fn primitive_mesh(primitive: Primitive) -> Mesh {
    match primitive {
        Primitive::Cube => Cuboid::new(1.0, 1.0, 1.0).into(),
        Primitive::Cylinder => Cylinder::new(0.5, 1.0).into(),
        Primitive::Cone => Cone::new(0.5, 1.0).into(),
        Primitive::Sphere => Sphere::new(0.5).mesh().uv(32, 18),
        Primitive::Quad => Rectangle::new(1.0, 1.0).into(),
        Primitive::Plane => Plane3d::default().mesh().size(1.0, 1.0).build(),
        Primitive::Circle => Circle::new(0.5).into(),
    }
}

/// Unit collider matching [`primitive_mesh`]; rapier applies the transform scale.
/// Flat XY pieces are decoration and get none.
pub fn primitive_collider(primitive: Primitive) -> Option<Collider> {
    match primitive {
        Primitive::Cube => Some(Collider::cuboid(0.5, 0.5, 0.5)),
        Primitive::Cylinder => Some(Collider::cylinder(0.5, 0.5)),
        Primitive::Cone => Some(Collider::cone(0.5, 0.5)),
        Primitive::Sphere => Some(Collider::ball(0.5)),
        // Thin slab hanging below the plane so its top is the plane itself
        Primitive::Plane => Some(Collider::compound(vec![(
            Vec3::new(0.0, -PLANE_COLLIDER_HALF_THICKNESS, 0.0),
            Quat::IDENTITY,
            Collider::cuboid(0.5, PLANE_COLLIDER_HALF_THICKNESS, 0.5),
        )])),
        Primitive::Quad | Primitive::Circle => None,
    }
}

/// Flat pieces are visible from both sides.
fn is_flat(primitive: Primitive) -> bool {
    matches!(primitive, Primitive::Quad | Primitive::Plane | Primitive::Circle)
}

/// Spawn the visual world
pub fn spawn_world(
    mut commands: Commands,
    world_roots: Query<Entity, With<LayoutRoot>>,
    layout: Res<ActiveLayout>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !world_roots.is_empty() {
        return;
    }
    let layout: &SceneLayout = &layout.0;

    let root = commands
        .spawn((
            LayoutRoot,
            Name::new(layout.name.clone()),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    // Shared handles: a handful of primitives and colours cover every layout
    let mut mesh_cache: HashMap<Primitive, Handle<Mesh>> = HashMap::new();
    let mut material_cache: HashMap<(Rgb, bool), Handle<StandardMaterial>> = HashMap::new();

    let mut collider_count = 0;
    for (idx, piece) in layout.pieces.iter().enumerate() {
        let mesh = mesh_cache
            .entry(piece.primitive)
            .or_insert_with(|| meshes.add(primitive_mesh(piece.primitive)))
            .clone();

        let flat = is_flat(piece.primitive);
        let material = material_cache
            .entry((piece.color, flat))
            .or_insert_with(|| {
                materials.add(StandardMaterial {
                    base_color: piece.color.to_color(),
                    perceptual_roughness: 0.9,
                    metallic: 0.0,
                    double_sided: flat,
                    cull_mode: if flat { None } else { Some(Face::Back) },
                    ..default()
                })
            })
            .clone();

        let mut entity = commands.spawn((
            LayoutPiece(idx),
            Mesh3d(mesh),
            MeshMaterial3d(material),
            piece.transform(),
        ));
        if piece.collidable {
            if let Some(collider) = primitive_collider(piece.primitive) {
                entity.insert(collider);
                collider_count += 1;
            }
        }
        let entity = entity.id();
        commands.entity(root).add_child(entity);
    }

    for light in layout.lights.iter() {
        let light_entity = match *light {
            LightPlacement::Point {
                position,
                color,
                intensity,
            } => commands
                .spawn((
                    PointLight {
                        color: color.to_color(),
                        intensity,
                        range: POINT_LIGHT_RANGE,
                        shadows_enabled: true,
                        ..default()
                    },
                    Transform::from_translation(position),
                ))
                .id(),
            LightPlacement::Directional {
                direction,
                color,
                illuminance,
            } => commands
                .spawn((
                    DirectionalLight {
                        color: color.to_color(),
                        illuminance,
                        shadows_enabled: true,
                        ..default()
                    },
                    Transform::default().looking_to(direction, Vec3::Y),
                ))
                .id(),
        };
        commands.entity(root).add_child(light_entity);
    }

    commands.insert_resource(AmbientLight {
        color: layout.ambient.to_color(),
        brightness: layout.ambient_brightness,
        affects_lightmapped_meshes: true,
    });
    commands.insert_resource(ClearColor(layout.sky.to_color()));

    info!(
        "Spawned layout '{}': {} pieces ({} colliders), {} lights",
        layout.name,
        layout.pieces.len(),
        collider_count,
        layout.lights.len()
    );
}
