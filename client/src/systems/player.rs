//! Player character systems
//!
//! Spawning the character body, running the controller each frame against
//! the rapier colliders, and syncing the transform.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{QueryFilter, ReadRapierContext};
use shared::{
    resolve_body_model, step_character, BodyModel, CharacterState, ControllerTuning, Player,
    ProbeFn, SpawnPoint,
};

use crate::input::InputState;
use crate::{asset_dir, ActiveLayout};

/// Colliders a ground ray may start inside before it gives up.
const MAX_OVERLAPPING_SOLIDS: usize = 4;

/// The child entity carrying the character's mesh or model.
#[derive(Component)]
pub struct PlayerBody;

// =============================================================================
// PLAYER SPAWNING
// =============================================================================

/// Spawn the controllable character if the layout has one.
pub fn spawn_player(
    mut commands: Commands,
    layout: Res<ActiveLayout>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(setup) = layout.0.player else {
        return;
    };

    let model = resolve_body_model(asset_dir(), setup.body.external_models);
    let offset = setup.body.mesh_offset();

    let body = match model.scene_path() {
        Some(path) => {
            info!("Using external character model {path}");
            commands
                .spawn((
                    PlayerBody,
                    SceneRoot(asset_server.load(path)),
                    Transform::from_translation(offset - Vec3::Y * (setup.body.size.y * 0.5)),
                ))
                .id()
        }
        None => commands
            .spawn((
                PlayerBody,
                Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: setup.body.color.to_color(),
                    perceptual_roughness: 0.8,
                    ..default()
                })),
                Transform::from_translation(offset).with_scale(setup.body.size),
            ))
            .id(),
    };

    let player = commands
        .spawn((
            Player,
            CharacterState::at(setup.spawn),
            SpawnPoint(setup.spawn),
            setup.tuning,
            Transform::from_translation(setup.spawn),
            Visibility::default(),
        ))
        .id();
    commands.entity(player).add_child(body);

    info!(
        "Spawned player at {:?} (body {:?}, grounding {:?})",
        setup.spawn,
        if model == BodyModel::Builtin { "builtin" } else { "external" },
        setup.tuning.grounding
    );
}

// =============================================================================
// PER-FRAME CONTROLLER
// =============================================================================

/// Distance to the first surface below a ray origin.
///
/// A solid ray reports the collider it starts in at distance 0. Those are
/// walked through, so they are skipped and `cast` runs again with every
/// collider found so far excluded.
pub fn first_surface_below(
    mut cast: impl FnMut(&[Entity]) -> Option<(Entity, f32)>,
) -> Option<f32> {
    let mut inside: Vec<Entity> = Vec::new();
    for _ in 0..MAX_OVERLAPPING_SOLIDS {
        let (entity, toi) = cast(&inside)?;
        if toi > 0.0 {
            return Some(toi);
        }
        inside.push(entity);
    }
    None
}

/// Run one controller step with a downward rapier raycast as the ground probe.
pub fn drive_player(
    input_state: Res<InputState>,
    time: Res<Time>,
    rapier_context: ReadRapierContext,
    mut players: Query<
        (&mut CharacterState, &ControllerTuning, &SpawnPoint, &mut Transform),
        With<Player>,
    >,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    let probe = ProbeFn(|origin: Vec3, max_distance: f32| {
        first_surface_below(|inside| {
            let skip_inside = |entity: Entity| !inside.contains(&entity);
            let filter = QueryFilter::default().predicate(&skip_inside);
            context.cast_ray(origin, Vec3::NEG_Y, max_distance, true, filter)
        })
        .map(|toi| origin + Vec3::NEG_Y * toi)
    });

    let input = input_state.player_input();
    let dt = time.delta_secs();

    for (mut state, tuning, spawn, mut transform) in players.iter_mut() {
        let outcome = step_character(&input, &probe, tuning, spawn, &mut state, dt);

        if outcome.respawned {
            info!(
                "Player fell below kill plane (y < {}), respawned at {:?}",
                tuning.kill_plane_y, spawn.0
            );
        } else if outcome.landed {
            debug!("Player landed at {:?}", state.position);
        }

        transform.translation = state.position;
        transform.rotation = state.facing();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nearest collider along the ray that has not been excluded yet.
    /// `hits` holds (entity, distance), nearest first.
    fn surface(hits: &[(Entity, f32)]) -> Option<f32> {
        first_surface_below(|inside| hits.iter().copied().find(|(e, _)| !inside.contains(e)))
    }

    #[test]
    fn test_surface_below_plain_hit() {
        let mut world = World::new();
        let floor = world.spawn_empty().id();
        assert_eq!(surface(&[(floor, 0.1)]), Some(0.1));
        assert_eq!(surface(&[]), None);
    }

    #[test]
    fn test_surface_below_skips_solid_the_ray_starts_in() {
        let mut world = World::new();
        let column = world.spawn_empty().id();
        let floor = world.spawn_empty().id();
        assert_eq!(surface(&[(column, 0.0), (floor, 0.1)]), Some(0.1));
        // Standing inside the column with nothing below it
        assert_eq!(surface(&[(column, 0.0)]), None);
    }

    #[test]
    fn test_surface_below_gives_up_inside_many_solids() {
        let mut world = World::new();
        let hits: Vec<(Entity, f32)> = (0..=MAX_OVERLAPPING_SOLIDS)
            .map(|_| (world.spawn_empty().id(), 0.0))
            .collect();
        assert_eq!(surface(&hits), None);
    }
}
