//! Scene layout records.
//!
//! Every demo scene is a [`SceneLayout`]: a flat list of primitive
//! placements plus lights, sky, camera rig and an optional player. The client
//! spawns any layout the same way, so scenes differ only in data.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{BodySetup, ControllerTuning};

/// Builtin unit-sized shapes. All are centred on their position.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// 1x1x1 box
    Cube,
    /// Diameter 1, height 1
    Cylinder,
    /// Base diameter 1 at y = -0.5, apex at y = +0.5
    Cone,
    /// Diameter 1
    Sphere,
    /// 1x1 in XY, facing +Z
    Quad,
    /// 1x1 in XZ, facing +Y
    Plane,
    /// Diameter 1 in XY, facing +Z
    Circle,
}

/// An sRGB colour as 8-bit channels.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);
    pub const YELLOW: Rgb = Rgb(255, 255, 0);
    pub const ORANGE: Rgb = Rgb(255, 128, 0);

    pub fn to_color(self) -> Color {
        Color::srgb_u8(self.0, self.1, self.2)
    }
}

/// One placed primitive.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ShapePlacement {
    pub primitive: Primitive,
    pub position: Vec3,
    pub scale: Vec3,
    /// Euler angles in degrees, applied in YXZ order.
    pub rotation_deg: Vec3,
    pub color: Rgb,
    /// Takes part in ground raycasts.
    pub collidable: bool,
}

impl ShapePlacement {
    pub fn new(primitive: Primitive, position: Vec3, scale: Vec3, color: Rgb) -> Self {
        Self {
            primitive,
            position,
            scale,
            rotation_deg: Vec3::ZERO,
            color,
            collidable: false,
        }
    }

    pub fn cube(position: Vec3, scale: Vec3, color: Rgb) -> Self {
        Self::new(Primitive::Cube, position, scale, color)
    }

    pub fn solid(mut self) -> Self {
        self.collidable = true;
        self
    }

    pub fn rotated(mut self, degrees: Vec3) -> Self {
        self.rotation_deg = degrees;
        self
    }

    pub fn rotation(&self) -> Quat {
        let r = self.rotation_deg;
        Quat::from_euler(
            EulerRot::YXZ,
            r.y.to_radians(),
            r.x.to_radians(),
            r.z.to_radians(),
        )
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position)
            .with_rotation(self.rotation())
            .with_scale(self.scale)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum LightPlacement {
    Point { position: Vec3, color: Rgb, intensity: f32 },
    /// Shines along `direction`.
    Directional { direction: Vec3, color: Rgb, illuminance: f32 },
}

/// Camera behaviour for a scene.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub enum CameraRig {
    /// Third-person follow behind the player, orbiting only in yaw.
    Follow {
        /// Height of the orbit pivot above the player origin.
        pivot_height: f32,
        /// Camera height above the pivot.
        height: f32,
        /// Camera distance behind the pivot.
        distance: f32,
        pitch_deg: f32,
        fov_deg: f32,
        /// Starting yaw; PI puts the camera on the -Z side looking +Z.
        initial_yaw: f32,
    },
    /// Free-fly editor camera.
    Fly {
        position: Vec3,
        /// Initial look target.
        look_at: Vec3,
        fov_deg: f32,
        /// Flight speed in units/s.
        speed: f32,
    },
}

/// Player spawn description.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct PlayerSetup {
    pub spawn: Vec3,
    pub tuning: ControllerTuning,
    pub body: BodySetup,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SceneLayout {
    /// Stable id, also the override file stem.
    pub name: String,
    pub title: String,
    pub sky: Rgb,
    pub ambient: Rgb,
    pub ambient_brightness: f32,
    pub pieces: Vec<ShapePlacement>,
    pub lights: Vec<LightPlacement>,
    pub camera: CameraRig,
    pub player: Option<PlayerSetup>,
}

impl SceneLayout {
    pub fn collidable(&self) -> impl Iterator<Item = &ShapePlacement> {
        self.pieces.iter().filter(|p| p.collidable)
    }
}

/// Parse a layout from RON text.
pub fn load_layout_from_str(text: &str) -> Result<SceneLayout, String> {
    ron::from_str(text).map_err(|e| format!("ron parse failed: {e}"))
}

/// Load a layout from a RON file.
pub fn load_layout_from_file(path: impl AsRef<Path>) -> Result<SceneLayout, String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| format!("failed to read {path:?}: {e}"))?;
    load_layout_from_str(&text)
}

/// Serialize a layout to pretty RON (for writing override files).
pub fn layout_to_ron(layout: &SceneLayout) -> Result<String, String> {
    ron::ser::to_string_pretty(layout, ron::ser::PrettyConfig::default())
        .map_err(|e| format!("ron serialize failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_degrees() {
        let quad = ShapePlacement::new(Primitive::Quad, Vec3::ZERO, Vec3::ONE, Rgb::WHITE)
            .rotated(Vec3::new(0.0, 180.0, 0.0));
        // Quad normal (+Z) turned to face -Z
        let normal = quad.rotation() * Vec3::Z;
        assert!((normal - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_load_layout_rejects_garbage() {
        let err = load_layout_from_str("not a layout").unwrap_err();
        assert!(err.contains("ron parse failed"));
    }

    #[test]
    fn test_load_layout_missing_file() {
        let err = load_layout_from_file("/definitely/not/here.ron").unwrap_err();
        assert!(err.contains("failed to read"));
    }
}
