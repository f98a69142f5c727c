//! Horizontal movement: turn held keys into a heading and walk along it.

use bevy::prelude::*;

use crate::{CharacterState, PlayerInput};

/// Forward direction on the XZ plane for a yaw angle.
/// In Bevy: +X is right, +Y is up, -Z is forward.
#[inline]
pub fn yaw_forward(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Right direction on the XZ plane for a yaw angle.
#[inline]
pub fn yaw_right(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Inverse of [`yaw_forward`] for a horizontal direction.
#[inline]
pub fn yaw_of(direction: Vec3) -> f32 {
    (-direction.x).atan2(-direction.z)
}

/// Normalized XZ direction requested by the input, relative to `input.yaw`.
///
/// Returns `None` when no key is held or opposite keys cancel out.
pub fn desired_direction(input: &PlayerInput) -> Option<Vec3> {
    let forward = yaw_forward(input.yaw);
    let right = yaw_right(input.yaw);

    let mut direction = Vec3::ZERO;
    if input.forward {
        direction += forward;
    }
    if input.backward {
        direction -= forward;
    }
    if input.right {
        direction += right;
    }
    if input.left {
        direction -= right;
    }

    direction.y = 0.0;
    (direction.length_squared() > 0.0).then(|| direction.normalize())
}

/// Apply movement input: face the heading and advance along it.
///
/// Returns the heading used, if any.
pub fn apply_heading(
    input: &PlayerInput,
    state: &mut CharacterState,
    speed: f32,
    delta_seconds: f32,
) -> Option<Vec3> {
    let direction = desired_direction(input)?;
    state.facing_yaw = yaw_of(direction);
    state.position += direction * speed * delta_seconds;
    Some(direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keys_does_not_move() {
        let mut state = CharacterState::at(Vec3::new(1.0, 2.0, 3.0));
        let heading = apply_heading(&PlayerInput::default(), &mut state, 6.0, 0.1);
        assert!(heading.is_none());
        assert_eq!(state.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let input = PlayerInput {
            forward: true,
            backward: true,
            ..default()
        };
        assert!(desired_direction(&input).is_none());
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let input = PlayerInput {
            forward: true,
            right: true,
            ..default()
        };
        let mut state = CharacterState::at(Vec3::ZERO);
        apply_heading(&input, &mut state, 6.0, 1.0);
        assert!((state.position.length() - 6.0).abs() < 1e-4);
        assert!(state.position.x > 0.0 && state.position.z < 0.0);
    }

    #[test]
    fn test_world_axes_at_zero_yaw() {
        let input = PlayerInput {
            right: true,
            ..default()
        };
        let mut state = CharacterState::at(Vec3::ZERO);
        apply_heading(&input, &mut state, 10.0, 0.1);
        assert!((state.position - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-5);
        // Facing +X
        assert!((yaw_forward(state.facing_yaw) - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_heading_follows_camera_yaw() {
        // Camera turned around: forward is +Z
        let input = PlayerInput {
            forward: true,
            yaw: std::f32::consts::PI,
            ..default()
        };
        let mut state = CharacterState::at(Vec3::ZERO);
        apply_heading(&input, &mut state, 1.0, 1.0);
        assert!((state.position - Vec3::Z).length() < 1e-5);
    }
}
