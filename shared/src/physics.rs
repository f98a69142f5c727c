//! Character-controller style physics.
//!
//! One call to [`step_character`] per rendered frame:
//! heading, gravity, ground ray, jump, kill plane. The ground query is
//! abstracted behind [`GroundProbe`] so the same step runs against rapier in
//! the client and against [`crate::StaticColliderSet`] headless.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{movement::apply_heading, CharacterState, PlayerInput, SpawnPoint, KILL_PLANE_Y};

/// Above this upward speed a post-move probe will not ground the character
/// (it is still leaving the floor).
pub const SNAP_MAX_RISE_SPEED: f32 = 0.1;

/// Downward raycast supplied by whoever owns the colliders.
pub trait GroundProbe {
    /// Cast straight down from `origin`. Returns the world-space hit point if a
    /// surface lies within `max_distance`.
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<Vec3>;
}

/// Adapter so a closure can act as a probe.
pub struct ProbeFn<F>(pub F);

impl<F> GroundProbe for ProbeFn<F>
where
    F: Fn(Vec3, f32) -> Option<Vec3>,
{
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<Vec3> {
        (self.0)(origin, max_distance)
    }
}

impl<P: GroundProbe + ?Sized> GroundProbe for &P {
    fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<Vec3> {
        (**self).cast_down(origin, max_distance)
    }
}

/// How the ground ray is cast each frame.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum GroundingMode {
    /// Descending: sweep `|dy| + snap` below `position + skin` before moving,
    /// so fast falls cannot tunnel through thin floors.
    /// Ascending or still: move, then a `snap` long probe.
    Sweep { skin: f32, snap: f32 },
    /// Move first, then probe `reach` below `position + lift`.
    /// Like the sweep's snap probe, ignored while rising.
    PostMove { lift: f32, reach: f32 },
}

/// Fixed tuning constants for one character.
#[derive(Component, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ControllerTuning {
    /// Horizontal speed in units/s.
    pub move_speed: f32,
    /// Upward velocity set by a jump.
    pub jump_speed: f32,
    /// Vertical acceleration (negative).
    pub gravity: f32,
    /// Most negative vertical velocity allowed.
    pub terminal_velocity: f32,
    pub kill_plane_y: f32,
    /// Height of the character origin above the hit point
    /// (0 for a feet pivot, half height for a centre pivot).
    pub foot_offset: f32,
    pub grounding: GroundingMode,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        Self::indoor()
    }
}

impl ControllerTuning {
    /// Indoor hall: sweep grounding, feet pivot.
    pub fn indoor() -> Self {
        Self {
            move_speed: 6.0,
            jump_speed: 10.0,
            gravity: -25.0,
            terminal_velocity: -20.0,
            kill_plane_y: KILL_PLANE_Y,
            foot_offset: 0.0,
            grounding: GroundingMode::Sweep {
                skin: 0.05,
                snap: 0.25,
            },
        }
    }

    /// Plain indoor room: short probe after moving.
    pub fn indoor_basic() -> Self {
        Self {
            grounding: GroundingMode::PostMove {
                lift: 0.1,
                reach: 0.2,
            },
            ..Self::indoor()
        }
    }

    /// Castle grounds: heavier, faster, centre pivot 0.8 above the feet.
    pub fn castle() -> Self {
        Self {
            move_speed: 10.0,
            jump_speed: 12.6,
            gravity: -36.0,
            terminal_velocity: -22.5,
            kill_plane_y: KILL_PLANE_Y,
            foot_offset: 0.8,
            grounding: GroundingMode::PostMove {
                lift: 0.0,
                reach: 1.0,
            },
        }
    }
}

/// What happened during one step (for logging / presentation).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Airborne before, grounded after the ground resolve.
    pub landed: bool,
    pub jumped: bool,
    pub respawned: bool,
}

/// Vertical velocity after one frame of gravity, clamped to terminal velocity.
#[inline]
pub fn integrate_gravity(velocity_y: f32, tuning: &ControllerTuning, dt: f32) -> f32 {
    (velocity_y + tuning.gravity * dt).max(tuning.terminal_velocity)
}

/// Step the character one frame.
///
/// - Heading from input (relative to `input.yaw`)
/// - Gravity, clamped to terminal velocity
/// - Ground ray per [`GroundingMode`]; a hit snaps and stops vertical motion
/// - Jump (only while grounded)
/// - Kill plane respawn
pub fn step_character(
    input: &PlayerInput,
    probe: &impl GroundProbe,
    tuning: &ControllerTuning,
    spawn: &SpawnPoint,
    state: &mut CharacterState,
    dt: f32,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();
    let was_grounded = state.grounded;

    // --- Heading ---
    apply_heading(input, state, tuning.move_speed, dt);

    // --- Gravity ---
    state.velocity_y = integrate_gravity(state.velocity_y, tuning, dt);
    let dy = state.velocity_y * dt;

    // --- Ground ---
    let hit = match tuning.grounding {
        GroundingMode::Sweep { skin, snap } => {
            let origin = state.position + Vec3::Y * skin;
            if dy < 0.0 {
                let hit = probe.cast_down(origin, dy.abs() + snap);
                if hit.is_none() {
                    state.position.y += dy;
                }
                hit
            } else {
                state.position.y += dy;
                let origin = state.position + Vec3::Y * skin;
                probe
                    .cast_down(origin, snap)
                    .filter(|_| state.velocity_y <= SNAP_MAX_RISE_SPEED)
            }
        }
        GroundingMode::PostMove { lift, reach } => {
            state.position.y += dy;
            probe
                .cast_down(state.position + Vec3::Y * lift, reach)
                .filter(|_| state.velocity_y <= SNAP_MAX_RISE_SPEED)
        }
    };

    match hit {
        Some(point) => {
            state.position.y = point.y + tuning.foot_offset;
            state.velocity_y = 0.0;
            state.grounded = true;
            outcome.landed = !was_grounded;
        }
        None => state.grounded = false,
    }

    // --- Jump ---
    if input.jump && state.grounded {
        state.velocity_y = tuning.jump_speed;
        state.grounded = false;
        outcome.jumped = true;
    }

    // --- Kill plane ---
    if state.position.y < tuning.kill_plane_y {
        state.position = spawn.0;
        state.velocity_y = 0.0;
        state.grounded = false;
        outcome.respawned = true;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Infinite floor at a fixed height.
    struct Floor(f32);

    impl GroundProbe for Floor {
        fn cast_down(&self, origin: Vec3, max_distance: f32) -> Option<Vec3> {
            let gap = origin.y - self.0;
            (gap >= 0.0 && gap <= max_distance).then(|| Vec3::new(origin.x, self.0, origin.z))
        }
    }

    struct Void;

    impl GroundProbe for Void {
        fn cast_down(&self, _origin: Vec3, _max_distance: f32) -> Option<Vec3> {
            None
        }
    }

    fn idle() -> PlayerInput {
        PlayerInput::default()
    }

    fn jump() -> PlayerInput {
        PlayerInput {
            jump: true,
            ..default()
        }
    }

    #[test]
    fn test_free_fall_one_frame() {
        let tuning = ControllerTuning::indoor();
        let spawn = SpawnPoint(Vec3::new(0.0, 2.0, 0.0));
        let mut state = CharacterState::at(spawn.0);

        let outcome = step_character(&idle(), &Void, &tuning, &spawn, &mut state, 0.1);

        assert!((state.velocity_y - -2.5).abs() < 1e-5);
        assert!((state.position.y - 1.75).abs() < 1e-5);
        assert!(!state.grounded);
        assert_eq!(outcome, StepOutcome::default());
    }

    #[test]
    fn test_free_fall_post_move_matches_sweep() {
        let tuning = ControllerTuning::indoor_basic();
        let spawn = SpawnPoint(Vec3::new(0.0, 2.0, 0.0));
        let mut state = CharacterState::at(spawn.0);

        step_character(&idle(), &Void, &tuning, &spawn, &mut state, 0.1);

        assert!((state.velocity_y - -2.5).abs() < 1e-5);
        assert!((state.position.y - 1.75).abs() < 1e-5);
    }

    #[test]
    fn test_sweep_lands_fast_fall() {
        let tuning = ControllerTuning::indoor();
        let spawn = SpawnPoint::default();
        let mut state = CharacterState {
            velocity_y: -10.0,
            ..CharacterState::at(Vec3::new(0.0, 5.0, 0.0))
        };

        // v = -10 - 25*0.2 = -15, dy = -3 -> sweep reaches 3.25 + skin... still short of 5
        let outcome = step_character(&idle(), &Floor(0.0), &tuning, &spawn, &mut state, 0.2);
        assert!(!state.grounded);
        assert!(!outcome.landed);
        assert!((state.position.y - 2.0).abs() < 1e-4);

        // v = -20 (clamped), dy = -4 -> floor is 2.05 below the ray origin
        let outcome = step_character(&idle(), &Floor(0.0), &tuning, &spawn, &mut state, 0.2);
        assert_eq!(state.position.y, 0.0);
        assert_eq!(state.velocity_y, 0.0);
        assert!(state.grounded);
        assert!(outcome.landed);
    }

    #[test]
    fn test_hit_snaps_with_foot_offset() {
        let tuning = ControllerTuning::castle();
        let spawn = SpawnPoint::default();
        let mut state = CharacterState::at(Vec3::new(0.0, 1.1, 0.0));

        step_character(&idle(), &Floor(0.2), &tuning, &spawn, &mut state, 1.0 / 60.0);

        assert!((state.position.y - 1.0).abs() < 1e-5);
        assert_eq!(state.velocity_y, 0.0);
        assert!(state.grounded);
    }

    #[test]
    fn test_miss_clamps_to_terminal() {
        let tuning = ControllerTuning::indoor();
        let spawn = SpawnPoint(Vec3::new(0.0, 100.0, 0.0));
        let mut state = CharacterState {
            velocity_y: -19.0,
            ..CharacterState::at(Vec3::new(0.0, 50.0, 0.0))
        };

        step_character(&idle(), &Void, &tuning, &spawn, &mut state, 0.1);

        assert_eq!(state.velocity_y, tuning.terminal_velocity);
        assert!((state.position.y - 48.0).abs() < 1e-4);
    }

    #[test]
    fn test_jump_requires_ground() {
        let tuning = ControllerTuning::indoor();
        let spawn = SpawnPoint::default();
        let mut state = CharacterState::at(Vec3::new(0.0, 10.0, 0.0));

        let outcome = step_character(&jump(), &Void, &tuning, &spawn, &mut state, 0.1);

        assert!(!outcome.jumped);
        assert!(state.velocity_y < 0.0);
    }

    #[test]
    fn test_jump_from_ground() {
        let tuning = ControllerTuning::indoor();
        let spawn = SpawnPoint::default();
        let mut state = CharacterState::at(Vec3::ZERO);

        let outcome = step_character(&jump(), &Floor(0.0), &tuning, &spawn, &mut state, 1.0 / 60.0);

        assert!(outcome.jumped);
        assert!(!state.grounded);
        assert_eq!(state.velocity_y, tuning.jump_speed);

        // Next frame rises and is not pulled back by the snap probe
        step_character(&idle(), &Floor(0.0), &tuning, &spawn, &mut state, 1.0 / 60.0);
        assert!(state.position.y > 0.0);
        assert!(!state.grounded);
        assert!(state.velocity_y > 0.0);
    }

    #[test]
    fn test_castle_jump_leaves_long_probe() {
        let tuning = ControllerTuning::castle();
        let spawn = SpawnPoint::default();
        let mut state = CharacterState::at(Vec3::new(0.0, 0.8, 0.0));
        let dt = 1.0 / 60.0;

        let outcome = step_character(&jump(), &Floor(0.0), &tuning, &spawn, &mut state, dt);
        assert!(outcome.jumped);

        // The floor is still within the 1.0 reach, but the character is rising
        step_character(&idle(), &Floor(0.0), &tuning, &spawn, &mut state, dt);
        assert!(!state.grounded);
        assert!(state.position.y > 0.8);
        assert!(state.velocity_y > 0.0);
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let tuning = ControllerTuning::indoor_basic();
        let spawn = SpawnPoint::default();
        let mut state = CharacterState::at(Vec3::ZERO);
        let dt = 1.0 / 60.0;

        step_character(&jump(), &Floor(0.0), &tuning, &spawn, &mut state, dt);
        let mut peak: f32 = 0.0;
        for _ in 0..120 {
            step_character(&idle(), &Floor(0.0), &tuning, &spawn, &mut state, dt);
            peak = peak.max(state.position.y);
        }

        // v^2 / 2g = 100 / 50
        assert!(peak > 1.8 && peak < 2.1, "peak {peak}");
        assert!(state.grounded);
        assert_eq!(state.position.y, 0.0);
    }

    #[test]
    fn test_kill_plane_respawns() {
        let tuning = ControllerTuning::indoor();
        let spawn = SpawnPoint(Vec3::new(0.0, 2.0, 0.0));
        let mut state = CharacterState {
            velocity_y: -20.0,
            ..CharacterState::at(Vec3::new(3.0, -19.9, 4.0))
        };

        let outcome = step_character(&idle(), &Void, &tuning, &spawn, &mut state, 0.1);

        assert!(outcome.respawned);
        assert_eq!(state.position, spawn.0);
        assert_eq!(state.velocity_y, 0.0);
    }

    #[test]
    fn test_above_kill_plane_keeps_falling() {
        let tuning = ControllerTuning::indoor();
        let spawn = SpawnPoint::default();
        let mut state = CharacterState::at(Vec3::new(0.0, -10.0, 0.0));

        let outcome = step_character(&idle(), &Void, &tuning, &spawn, &mut state, 0.1);

        assert!(!outcome.respawned);
        assert!(state.position.y < -10.0);
    }

    #[test]
    fn test_walking_keeps_ground() {
        let tuning = ControllerTuning::indoor();
        let spawn = SpawnPoint::default();
        let mut state = CharacterState::at(Vec3::ZERO);
        state.grounded = true;
        let input = PlayerInput {
            forward: true,
            ..default()
        };

        for _ in 0..60 {
            step_character(&input, &Floor(0.0), &tuning, &spawn, &mut state, 1.0 / 60.0);
            assert!(state.grounded);
        }
        assert!((state.position.z - -6.0).abs() < 1e-3);
        assert_eq!(state.position.y, 0.0);
    }

    #[test]
    fn test_probe_fn_adapter() {
        let probe = ProbeFn(|origin: Vec3, _max: f32| Some(Vec3::new(origin.x, 0.5, origin.z)));
        assert_eq!(
            probe.cast_down(Vec3::new(1.0, 3.0, 2.0), 10.0),
            Some(Vec3::new(1.0, 0.5, 2.0))
        );
    }
}
