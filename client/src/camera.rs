//! Third-person follow camera and free-fly editor camera

use bevy::prelude::*;
use shared::{yaw_forward, yaw_of, CameraRig, Player};

use crate::input::InputState;
use crate::ActiveLayout;

/// Follow camera smoothing rate (1/s)
const FOLLOW_SMOOTHING: f32 = 35.0;

/// Fly speed multiplier while Shift is held
const FLY_FAST_MULTIPLIER: f32 = 3.0;

/// Orbit parameters of the third-person camera.
#[derive(Component, Clone, Copy, Debug)]
pub struct FollowCamera {
    pub pivot_height: f32,
    pub height: f32,
    pub distance: f32,
    pub pitch_deg: f32,
}

/// Free-fly editor camera.
#[derive(Component, Clone, Copy, Debug)]
pub struct FlyCamera {
    pub speed: f32,
}

/// Camera pose behind `target` for a given orbit yaw.
///
/// The camera sits `distance` behind and `height` above the pivot, pitched
/// down by the rig's fixed angle. Yaw 0 looks along -Z.
pub fn follow_pose(target: Vec3, rig: &FollowCamera, yaw: f32) -> (Vec3, Quat) {
    let pivot = target + Vec3::Y * rig.pivot_height;
    let position = pivot - yaw_forward(yaw) * rig.distance + Vec3::Y * rig.height;
    let rotation = Quat::from_euler(EulerRot::YXZ, yaw, -rig.pitch_deg.to_radians(), 0.0);
    (position, rotation)
}

/// Yaw and pitch looking from `eye` towards `target`.
pub fn look_angles(eye: Vec3, target: Vec3) -> (f32, f32) {
    let dir = (target - eye).normalize_or(Vec3::NEG_Z);
    let horizontal = Vec3::new(dir.x, 0.0, dir.z);
    let yaw = if horizontal.length_squared() > 0.0 {
        yaw_of(horizontal)
    } else {
        0.0
    };
    (yaw, dir.y.clamp(-1.0, 1.0).asin())
}

/// Spawn the scene camera described by the layout.
pub fn spawn_camera(
    mut commands: Commands,
    layout: Res<ActiveLayout>,
    mut input_state: ResMut<InputState>,
) {
    let layout = &layout.0;
    let target = layout.player.map(|p| p.spawn).unwrap_or(Vec3::ZERO);

    match layout.camera {
        CameraRig::Follow {
            pivot_height,
            height,
            distance,
            pitch_deg,
            fov_deg,
            initial_yaw,
        } => {
            let rig = FollowCamera {
                pivot_height,
                height,
                distance,
                pitch_deg,
            };
            input_state.yaw = initial_yaw;
            let (position, rotation) = follow_pose(target, &rig, initial_yaw);
            commands.spawn((
                Camera3d::default(),
                perspective(fov_deg),
                Transform::from_translation(position).with_rotation(rotation),
                rig,
            ));
        }
        CameraRig::Fly {
            position,
            look_at,
            fov_deg,
            speed,
        } => {
            let (yaw, pitch) = look_angles(position, look_at);
            input_state.yaw = yaw;
            input_state.pitch = pitch;
            commands.spawn((
                Camera3d::default(),
                perspective(fov_deg),
                Transform::from_translation(position)
                    .with_rotation(Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0)),
                FlyCamera { speed },
            ));
        }
    }

    info!("Spawned {:?} camera", layout.camera);
}

fn perspective(fov_deg: f32) -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: fov_deg.to_radians(),
        ..default()
    })
}

/// Keep the follow camera behind the player.
pub fn update_follow_camera(
    player_query: Query<&Transform, (With<Player>, Without<FollowCamera>)>,
    mut camera_query: Query<(&mut Transform, &FollowCamera)>,
    input_state: Res<InputState>,
    time: Res<Time>,
) {
    let Ok(player_transform) = player_query.single() else {
        return;
    };
    let Ok((mut camera_transform, rig)) = camera_query.single_mut() else {
        return;
    };

    let (target_pos, target_rot) = follow_pose(player_transform.translation, rig, input_state.yaw);

    // Mild smoothing; at typical frame rates this is close to a hard follow
    let t = 1.0_f32 - (-FOLLOW_SMOOTHING * time.delta_secs()).exp();
    camera_transform.translation = camera_transform.translation.lerp(target_pos, t);
    camera_transform.rotation = camera_transform.rotation.slerp(target_rot, t);
}

/// Editor-style flight: look with right-drag, move with W/A/S/D and E/Q.
pub fn update_fly_camera(
    mut camera_query: Query<(&mut Transform, &FlyCamera)>,
    input_state: Res<InputState>,
    time: Res<Time>,
) {
    let Ok((mut transform, fly)) = camera_query.single_mut() else {
        return;
    };

    transform.rotation = Quat::from_euler(EulerRot::YXZ, input_state.yaw, input_state.pitch, 0.0);

    let forward = transform.rotation * Vec3::NEG_Z;
    let right = transform.rotation * Vec3::X;
    let axis = |positive: bool, negative: bool| positive as i32 as f32 - negative as i32 as f32;

    let mut velocity = forward * axis(input_state.forward, input_state.backward)
        + right * axis(input_state.right, input_state.left)
        + Vec3::Y * axis(input_state.ascend, input_state.descend);
    if velocity.length_squared() == 0.0 {
        return;
    }
    velocity = velocity.normalize() * fly.speed;
    if input_state.fast {
        velocity *= FLY_FAST_MULTIPLIER;
    }
    transform.translation += velocity * time.delta_secs();
}
