//! Demo client - Renders a primitive-built scene and drives the character
//!
//! Every binary builds the same app around a different [`SceneLayout`].

pub mod camera;
pub mod input;
pub mod systems;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResolution};
use bevy_rapier3d::prelude::{NoUserData, RapierPhysicsPlugin};
use shared::{load_layout_from_file, SceneLayout};
use std::path::PathBuf;

/// The layout this app was launched with (possibly replaced by an override file).
#[derive(Resource, Clone, Debug)]
pub struct ActiveLayout(pub SceneLayout);

/// Per-frame ordering: read input, step the character, then place the camera.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    Input,
    Simulate,
    Camera,
}

/// Get the asset path - for bundled macOS apps, use path relative to executable
pub fn asset_dir() -> String {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let bundled_assets = exe_dir.join("assets");
            if bundled_assets.exists() {
                return bundled_assets.to_string_lossy().to_string();
            }
        }
    }
    // Fall back to default "assets" folder (for development)
    "assets".to_string()
}

/// Where a layout override for `name` would live.
pub fn layout_override_path(assets: &str, name: &str) -> PathBuf {
    PathBuf::from(assets).join("scenes").join(format!("{name}.ron"))
}

/// Scene, character and camera systems for one layout.
pub struct DemoScenePlugin {
    pub layout: SceneLayout,
}

impl Plugin for DemoScenePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ActiveLayout(self.layout.clone()))
            .init_resource::<input::InputState>()
            .configure_sets(
                Update,
                (FrameSet::Input, FrameSet::Simulate, FrameSet::Camera).chain(),
            )
            .add_systems(PreStartup, apply_layout_override)
            .add_systems(
                Startup,
                (systems::spawn_world, camera::spawn_camera, systems::spawn_player),
            )
            .add_systems(
                Update,
                (input::handle_keyboard_input, input::handle_mouse_input).in_set(FrameSet::Input),
            )
            .add_systems(Update, systems::drive_player.in_set(FrameSet::Simulate))
            .add_systems(
                Update,
                (camera::update_follow_camera, camera::update_fly_camera).in_set(FrameSet::Camera),
            );
    }
}

/// Replace the built-in layout with `assets/scenes/<name>.ron` when present.
fn apply_layout_override(
    mut layout: ResMut<ActiveLayout>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let path = layout_override_path(&asset_dir(), &layout.0.name);
    if !path.exists() {
        return;
    }

    match load_layout_from_file(&path) {
        Ok(replacement) => {
            info!("Loaded layout override from {:?}", path);
            layout.0 = replacement;
            if let Ok(mut window) = windows.single_mut() {
                window.title = layout.0.title.clone();
            }
        }
        Err(e) => warn!("Ignoring layout override {:?}: {}", path, e),
    }
}

/// Open a window on `layout` and run until it is closed.
pub fn run(layout: SceneLayout) {
    let asset_path = asset_dir();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: layout.title.clone(),
                        resolution: WindowResolution::new(1280, 720),
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    file_path: asset_path,
                    ..default()
                }),
        )
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(DemoScenePlugin { layout })
        .run();
}
