//! On-disk rig documents.
//!
//! A rig document is the CLI's stand-in for a host scene: one armature plus
//! the meshes skinned to it. Bones reference parents by name; a parent must
//! be declared before its children so the hierarchy is acyclic by
//! construction.

use anyhow::{bail, Context, Result};
use rigweld_core::{Armature, MeshWeights, Transform, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A complete rig document: armature and skinned meshes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigDocument {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// The skeleton.
    pub armature: ArmatureDocument,
    /// Meshes skinned to the skeleton.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub meshes: Vec<MeshDocument>,
}

impl RigDocument {
    /// Reads a rig document from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rig document: {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("malformed rig document: {}", path.display()))
    }

    /// Writes the rig document as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write rig document: {}", path.display()))
    }
}

/// An armature: world transform plus bone list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmatureDocument {
    /// The armature's world transform.
    #[serde(default)]
    pub world: Transform,
    /// Bones, parents before children.
    pub bones: Vec<BoneDocument>,
}

/// One bone entry of an armature document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneDocument {
    /// Unique bone name.
    pub name: String,
    /// Head position `[x, y, z]` in armature-local space.
    pub head: Vec3,
    /// Tail position `[x, y, z]` in armature-local space.
    pub tail: Vec3,
    /// Roll around the bone axis, radians.
    #[serde(default)]
    pub roll: f64,
    /// Parent bone name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Whether the head is pinned to the parent's tail.
    #[serde(default)]
    pub connected: bool,
}

impl ArmatureDocument {
    /// Builds the core arena from this document.
    ///
    /// Fails on duplicate bone names and on parents that are missing or
    /// declared after their children.
    pub fn to_armature(&self) -> Result<Armature> {
        let mut armature = Armature::new();
        let mut ids = BTreeMap::new();
        for bone in &self.bones {
            if ids.contains_key(&bone.name) {
                bail!("duplicate bone name: {}", bone.name);
            }
            let parent = match &bone.parent {
                Some(parent_name) => Some(*ids.get(parent_name).with_context(|| {
                    format!(
                        "bone '{}' references parent '{}' that is not declared before it",
                        bone.name, parent_name
                    )
                })?),
                None => None,
            };
            let id = armature.add_bone(&bone.name, bone.head, bone.tail, parent);
            if let Some(record) = armature.bone_mut(id) {
                record.roll = bone.roll;
                record.use_connect = bone.connected;
            }
            ids.insert(bone.name.clone(), id);
        }
        Ok(armature)
    }

    /// Rebuilds the document bone list from a core arena, keeping `world`.
    pub fn update_from(&mut self, armature: &Armature) {
        self.bones = armature
            .bones()
            .map(|(_, bone)| BoneDocument {
                name: bone.name.clone(),
                head: bone.head,
                tail: bone.tail,
                roll: bone.roll,
                parent: bone
                    .parent
                    .and_then(|p| armature.bone(p))
                    .map(|p| p.name.clone()),
                connected: bone.use_connect,
            })
            .collect();
    }
}

/// A mesh's named weight channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshDocument {
    /// Mesh name.
    pub name: String,
    /// Weight channels.
    #[serde(default)]
    pub channels: Vec<ChannelDocument>,
}

/// One weight channel: a named sparse per-vertex influence set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelDocument {
    /// Channel name (matches the deforming bone).
    pub name: String,
    /// Sparse vertex weights.
    #[serde(default)]
    pub weights: Vec<VertexWeight>,
}

/// A single vertex influence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VertexWeight {
    pub vertex: u32,
    pub weight: f64,
}

impl MeshDocument {
    fn channel(&self, name: &str) -> Option<&ChannelDocument> {
        self.channels.iter().find(|c| c.name == name)
    }

    fn channel_mut(&mut self, name: &str) -> Option<&mut ChannelDocument> {
        self.channels.iter_mut().find(|c| c.name == name)
    }
}

impl MeshWeights for MeshDocument {
    fn channel_names(&self) -> Vec<String> {
        self.channels.iter().map(|c| c.name.clone()).collect()
    }

    fn has_channel(&self, name: &str) -> bool {
        self.channel(name).is_some()
    }

    fn create_channel(&mut self, name: &str) {
        if !self.has_channel(name) {
            self.channels.push(ChannelDocument {
                name: name.to_string(),
                weights: Vec::new(),
            });
        }
    }

    fn remove_channel(&mut self, name: &str) {
        self.channels.retain(|c| c.name != name);
    }

    fn rename_channel(&mut self, from: &str, to: &str) {
        if let Some(channel) = self.channel_mut(from) {
            channel.name = to.to_string();
        }
    }

    fn merge_additive(&mut self, target: &str, source: &str) {
        let source_weights = self
            .channel(source)
            .map(|c| c.weights.clone())
            .unwrap_or_default();
        self.create_channel(target);
        if let Some(channel) = self.channel_mut(target) {
            let mut accumulated: BTreeMap<u32, f64> = channel
                .weights
                .iter()
                .map(|w| (w.vertex, w.weight))
                .collect();
            for w in source_weights {
                *accumulated.entry(w.vertex).or_insert(0.0) += w.weight;
            }
            channel.weights = accumulated
                .into_iter()
                .map(|(vertex, weight)| VertexWeight { vertex, weight })
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_json() -> &'static str {
        r#"{
            "name": "fixture",
            "armature": {
                "world": {
                    "basis": [[1, 0, 0], [0, 1, 0], [0, 0, 1]],
                    "translation": [0, 0, 0]
                },
                "bones": [
                    { "name": "Hips", "head": [0, 0, 1], "tail": [0, 0, 1.2] },
                    {
                        "name": "Spine",
                        "head": [0, 0, 1.2],
                        "tail": [0, 0, 1.5],
                        "parent": "Hips",
                        "connected": true
                    }
                ]
            },
            "meshes": [
                {
                    "name": "body",
                    "channels": [
                        {
                            "name": "Hips",
                            "weights": [ { "vertex": 0, "weight": 1.0 } ]
                        }
                    ]
                }
            ]
        }"#
    }

    #[test]
    fn document_round_trips_through_armature() {
        let mut doc: RigDocument = serde_json::from_str(sample_json()).unwrap();
        let armature = doc.armature.to_armature().unwrap();
        assert_eq!(armature.len(), 2);
        let spine = armature.find("Spine").unwrap();
        assert!(armature.bone(spine).unwrap().use_connect);

        doc.armature.update_from(&armature);
        assert_eq!(doc.armature.bones.len(), 2);
        assert_eq!(doc.armature.bones[1].parent.as_deref(), Some("Hips"));
        assert!(doc.armature.bones[1].connected);
    }

    #[test]
    fn forward_parent_reference_fails() {
        let doc = ArmatureDocument {
            world: Transform::identity(),
            bones: vec![BoneDocument {
                name: "Spine".to_string(),
                head: Vec3::ZERO,
                tail: Vec3::new(0.0, 0.0, 1.0),
                roll: 0.0,
                parent: Some("Hips".to_string()),
                connected: false,
            }],
        };
        let err = doc.to_armature().unwrap_err();
        assert!(err.to_string().contains("not declared before"));
    }

    #[test]
    fn duplicate_bone_names_fail() {
        let bone = BoneDocument {
            name: "Hips".to_string(),
            head: Vec3::ZERO,
            tail: Vec3::new(0.0, 0.0, 1.0),
            roll: 0.0,
            parent: None,
            connected: false,
        };
        let doc = ArmatureDocument {
            world: Transform::identity(),
            bones: vec![bone.clone(), bone],
        };
        assert!(doc.to_armature().is_err());
    }

    #[test]
    fn merge_additive_sums_by_vertex() {
        let mut mesh = MeshDocument {
            name: "m".to_string(),
            channels: Vec::new(),
        };
        mesh.create_channel("a");
        mesh.channel_mut("a").unwrap().weights = vec![
            VertexWeight {
                vertex: 0,
                weight: 0.5,
            },
            VertexWeight {
                vertex: 2,
                weight: 0.25,
            },
        ];
        mesh.create_channel("b");
        mesh.channel_mut("b").unwrap().weights = vec![
            VertexWeight {
                vertex: 2,
                weight: 0.5,
            },
            VertexWeight {
                vertex: 3,
                weight: 1.0,
            },
        ];

        mesh.merge_additive("a", "b");
        mesh.remove_channel("b");

        let weights: Vec<(u32, f64)> = mesh
            .channel("a")
            .unwrap()
            .weights
            .iter()
            .map(|w| (w.vertex, w.weight))
            .collect();
        assert_eq!(weights, vec![(0, 0.5), (2, 0.75), (3, 1.0)]);
        assert!(!mesh.has_channel("b"));
    }
}
