//! Player input handling
//!
//! Keyboard: W/A/S/D move, Space jumps. Fly camera: E/Q rise/sink, Shift is fast.
//! Mouse: hold the right button and drag to orbit (follow) or look (fly).

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use shared::{PlayerInput, MOUSE_SENSITIVITY};
use std::f32::consts::FRAC_PI_2;

/// Client-side input state
#[derive(Resource, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Jump request (spacebar)
    pub jump: bool,
    /// Fly camera only
    pub ascend: bool,
    pub descend: bool,
    pub fast: bool,
    /// Camera yaw; movement keys are relative to it.
    pub yaw: f32,
    /// Camera pitch (fly camera only; the follow camera has a fixed pitch)
    pub pitch: f32,
}

impl InputState {
    /// Snapshot for the character controller.
    pub fn player_input(&self) -> PlayerInput {
        PlayerInput {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            jump: self.jump,
            yaw: self.yaw,
        }
    }
}

/// Handle keyboard input for movement
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input_state: ResMut<InputState>,
) {
    input_state.forward = keyboard.pressed(KeyCode::KeyW);
    input_state.backward = keyboard.pressed(KeyCode::KeyS);
    input_state.left = keyboard.pressed(KeyCode::KeyA);
    input_state.right = keyboard.pressed(KeyCode::KeyD);
    input_state.jump = keyboard.pressed(KeyCode::Space);
    input_state.ascend = keyboard.pressed(KeyCode::KeyE);
    input_state.descend = keyboard.pressed(KeyCode::KeyQ);
    input_state.fast = keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
}

/// Right-drag turns the camera.
pub fn handle_mouse_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut input_state: ResMut<InputState>,
) {
    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }

    if delta == Vec2::ZERO || !mouse_button.pressed(MouseButton::Right) {
        return;
    }

    input_state.yaw -= delta.x * MOUSE_SENSITIVITY;
    input_state.pitch -= delta.y * MOUSE_SENSITIVITY;
    input_state.pitch = input_state.pitch.clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
}
