//! RigWeld core: canonical bone taxonomy, mapping presets, and rigid
//! skeleton retargeting.
//!
//! A skeletal rig is a hierarchical tree of oriented, positioned bones.
//! RigWeld maps an arbitrarily-named skeleton onto a fixed catalogue of
//! canonical bone keys through user-editable presets, folds redundant
//! weight channels into their main carriers, converts rigs between naming
//! conventions, and repositions one skeleton's joints to match another's
//! geometry while preserving articulation below each moved joint.
//!
//! # Example
//!
//! ```
//! use rigweld_core::preset::{Preset, PresetKind};
//! use rigweld_core::resolver::Resolver;
//! use std::collections::BTreeSet;
//!
//! let mut preset = Preset::new("vrc", PresetKind::Source);
//! preset.entry_mut("pelvis").set_main("Hips");
//!
//! let skeleton: BTreeSet<String> =
//!     ["Hips", "Spine", "Head"].iter().map(|n| n.to_string()).collect();
//! let resolver = Resolver::default();
//! let (main, aux) = resolver.matches_for_standard(&skeleton, &preset, "pelvis");
//! assert_eq!(main.as_deref(), Some("Hips"));
//! assert!(aux.is_empty());
//! ```
//!
//! # Modules
//!
//! - [`taxonomy`]: the fixed ordered catalogue of canonical bone keys
//! - [`preset`]: mapping presets and their JSON exchange format
//! - [`resolver`]: layered bone-name matching against concrete skeletons
//! - [`mirror`]: left/right bone-name mirroring
//! - [`convert`]: cross-preset conversion rule compilation and application
//! - [`armature`]: bone arena, vectors, and world transforms
//! - [`retarget`]: rigid hierarchical propagation and joint snapping
//! - [`collab`]: collaborator traits for skeleton and mesh access
//! - [`ops`]: host-facing batch operations with per-key miss tallies
//! - [`error`]: preset and operation error types

pub mod armature;
pub mod collab;
pub mod convert;
pub mod error;
pub mod mirror;
pub mod ops;
pub mod preset;
pub mod resolver;
pub mod retarget;
pub mod taxonomy;

// Re-export commonly used types at the crate root
pub use armature::{Armature, Bone, BoneId, Transform, Vec3};
pub use collab::{MeshWeights, SkeletonNames};
pub use convert::{apply_rules, compile_rules, ConversionRule, MeshConvertReport};
pub use error::{OpError, PresetError};
pub use mirror::{mirror_name, mirror_preset, MirrorReport};
pub use ops::{
    align_skeleton_by_name, apply_target_names, convert_meshes, mirror_preset_left_to_right,
    snap_skeleton, standardize, ConvertReport, RenameReport, StandardizeReport,
};
pub use preset::{MappingEntry, Preset, PresetInfo, PresetKind};
pub use resolver::{PrefixFamily, Resolver};
pub use retarget::{
    align_by_name, propagate, snap_to_source, world_joints, JointSnapshot, SnapMode, SnapReport,
};
