//! Player-related constants and types

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Below this height the character has fallen out of the level.
pub const KILL_PLANE_Y: f32 = -20.0;

/// Default spawn position (dropped onto whatever is below).
pub const SPAWN_POSITION: [f32; 3] = [0.0, 2.0, 0.0];

/// Mouse sensitivity for camera orbit / fly look
pub const MOUSE_SENSITIVITY: f32 = 0.003;

/// Held-key state for one frame.
///
/// `yaw` is the camera yaw the directional keys are relative to
/// (0 = world axes, forward is -Z).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub yaw: f32,
}

/// Marker component for the controllable character
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct Player;

/// Mutable per-frame state of the character.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CharacterState {
    pub position: Vec3,
    pub velocity_y: f32,
    pub grounded: bool,
    /// Facing around +Y; 0 faces -Z.
    pub facing_yaw: f32,
}

impl CharacterState {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            grounded: false,
            facing_yaw: 0.0,
        }
    }

    /// Rotation matching `facing_yaw`.
    pub fn facing(&self) -> Quat {
        Quat::from_rotation_y(self.facing_yaw)
    }
}

/// Where the character returns to after falling past the kill plane.
/// Set once when the character is spawned.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint(pub Vec3);

impl Default for SpawnPoint {
    fn default() -> Self {
        Self(Vec3::from_array(SPAWN_POSITION))
    }
}
