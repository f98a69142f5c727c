//! Character body appearance and optional external model lookup.

use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Rgb;

/// External model files are ignored unless a layout opts in.
pub const EXTERNAL_MODELS_DEFAULT: bool = false;

/// Model files searched for in the assets directory, in order.
pub const BODY_MODEL_CANDIDATES: [&str; 4] = ["mario.glb", "mario.gltf", "Mario.glb", "Mario.gltf"];

/// Where the character origin sits on its body.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyPivot {
    Feet,
    Center,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BodySetup {
    /// Box size of the builtin body.
    pub size: Vec3,
    pub pivot: BodyPivot,
    pub color: Rgb,
    pub external_models: bool,
}

impl BodySetup {
    /// Offset from the character origin to the centre of the body box.
    pub fn mesh_offset(&self) -> Vec3 {
        match self.pivot {
            BodyPivot::Feet => Vec3::Y * (self.size.y * 0.5),
            BodyPivot::Center => Vec3::ZERO,
        }
    }
}

/// Resolved body model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyModel {
    /// Builtin cube scaled to [`BodySetup::size`].
    Builtin,
    /// glTF file, relative to the assets directory.
    Gltf { file: String },
}

impl BodyModel {
    /// Asset path of the first scene in the file.
    pub fn scene_path(&self) -> Option<String> {
        match self {
            BodyModel::Builtin => None,
            BodyModel::Gltf { file } => Some(format!("{file}#Scene0")),
        }
    }
}

/// Find an external body model in `assets_dir`.
///
/// Falls back to [`BodyModel::Builtin`] when external models are disabled,
/// the directory does not exist, or no candidate file is present.
pub fn resolve_body_model(assets_dir: impl AsRef<Path>, allow_external: bool) -> BodyModel {
    if !allow_external {
        return BodyModel::Builtin;
    }
    let assets_dir = assets_dir.as_ref();
    if !assets_dir.is_dir() {
        return BodyModel::Builtin;
    }

    BODY_MODEL_CANDIDATES
        .iter()
        .find(|name| assets_dir.join(name).is_file())
        .map(|name| BodyModel::Gltf {
            file: name.to_string(),
        })
        .unwrap_or(BodyModel::Builtin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "castlewalk-body-{tag}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_disabled_is_builtin() {
        let dir = scratch_dir("disabled");
        std::fs::write(dir.join("mario.glb"), b"glTF").unwrap();
        assert_eq!(resolve_body_model(&dir, false), BodyModel::Builtin);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_dir_is_builtin() {
        assert_eq!(
            resolve_body_model("/no/such/assets/dir", true),
            BodyModel::Builtin
        );
    }

    #[test]
    fn test_finds_candidate() {
        let dir = scratch_dir("found");
        std::fs::write(dir.join("mario.gltf"), b"{}").unwrap();
        let model = resolve_body_model(&dir, true);
        assert_eq!(
            model,
            BodyModel::Gltf {
                file: "mario.gltf".to_string()
            }
        );
        assert_eq!(model.scene_path().as_deref(), Some("mario.gltf#Scene0"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_feet_pivot_offset() {
        let body = BodySetup {
            size: Vec3::new(1.0, 2.0, 1.0),
            pivot: BodyPivot::Feet,
            color: Rgb::BLUE,
            external_models: EXTERNAL_MODELS_DEFAULT,
        };
        assert_eq!(body.mesh_offset(), Vec3::new(0.0, 1.0, 0.0));
    }
}
