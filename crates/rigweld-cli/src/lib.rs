//! RigWeld CLI library.
//!
//! Hosts the core operations over on-disk JSON rig documents: a document
//! bundles an armature (bones with head/tail/roll/parent/connected and a
//! world transform) with the meshes skinned to it (named weight channels
//! holding sparse per-vertex weights).

pub mod commands;
pub mod document;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::document::{ArmatureDocument, BoneDocument, RigDocument};
    use rigweld_core::{Preset, Transform, Vec3};

    /// A two-bone rig: Hips with a connected Spine child, no meshes.
    pub fn minimal_rig() -> RigDocument {
        RigDocument {
            name: "fixture".to_string(),
            armature: ArmatureDocument {
                world: Transform::identity(),
                bones: vec![
                    BoneDocument {
                        name: "Hips".to_string(),
                        head: Vec3::new(0.0, 0.0, 1.0),
                        tail: Vec3::new(0.0, 0.0, 1.2),
                        roll: 0.0,
                        parent: None,
                        connected: false,
                    },
                    BoneDocument {
                        name: "Spine".to_string(),
                        head: Vec3::new(0.0, 0.0, 1.2),
                        tail: Vec3::new(0.0, 0.0, 1.5),
                        roll: 0.0,
                        parent: Some("Hips".to_string()),
                        connected: true,
                    },
                ],
            },
            meshes: Vec::new(),
        }
    }

    pub fn save_rig(dir: &tempfile::TempDir, file: &str, rig: &RigDocument) -> std::path::PathBuf {
        let path = dir.path().join(file);
        rig.save(&path).unwrap();
        path
    }

    pub fn save_preset(dir: &tempfile::TempDir, file: &str, preset: &Preset) -> std::path::PathBuf {
        let path = dir.path().join(file);
        preset.save(&path).unwrap();
        path
    }
}
