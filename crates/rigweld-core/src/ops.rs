//! Host-facing operations.
//!
//! Each operation validates its whole-operation preconditions before any
//! mutation, then runs a best-effort batch over the canonical keys: per-key
//! misses are skipped and tallied, never escalated. Reports carry the counts
//! a host surfaces to the user.

use serde::Serialize;

use crate::armature::{Armature, Transform};
use crate::collab::MeshWeights;
use crate::convert::{self, ConversionRule};
use crate::error::OpError;
use crate::mirror::{self, MirrorReport};
use crate::preset::Preset;
use crate::resolver::Resolver;
use crate::retarget::{self, JointSnapshot, SnapMode, SnapReport};
use crate::taxonomy;

/// Counts from a standardize (X) pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StandardizeReport {
    /// Main bones renamed to their canonical keys.
    pub renamed: usize,
    /// Auxiliary (and displaced) bones deleted.
    pub deleted: usize,
    /// Auxiliary weight channels merged across all meshes.
    pub merged: usize,
}

/// Standardizes a skeleton: folds auxiliary weight into the resolved main
/// channel on every mesh, renames each resolved main bone to its canonical
/// key, and deletes the auxiliary bones.
///
/// When a key has aux weight but no resolved main, the weight is merged
/// into a channel named after the canonical key itself so it stays
/// addressable instead of being dropped.
pub fn standardize<M: MeshWeights>(
    armature: &mut Armature,
    meshes: &mut [M],
    source_preset: &Preset,
    resolver: &Resolver,
) -> Result<StandardizeReport, OpError> {
    if armature.is_empty() {
        return Err(OpError::Selection("armature has no bones".to_string()));
    }

    // Match every canonical key up front; the rename pass below mutates the
    // name set it matched against.
    let mut analysis: Vec<(&str, Option<String>, Vec<String>)> = Vec::new();
    for key in taxonomy::STANDARD_BONES {
        let (main, aux) = resolver.matches_for_standard(armature, source_preset, key);
        if main.is_some() || !aux.is_empty() {
            analysis.push((key, main, aux));
        }
    }

    let mut report = StandardizeReport::default();

    for mesh in meshes.iter_mut() {
        for (key, main, aux) in &analysis {
            if aux.is_empty() {
                continue;
            }
            let destination = main.as_deref().unwrap_or(key);
            let present: Vec<&String> = aux.iter().filter(|a| mesh.has_channel(a)).collect();
            if present.is_empty() {
                continue;
            }
            if !mesh.has_channel(destination) {
                mesh.create_channel(destination);
            }
            for aux_name in present {
                mesh.merge_additive(destination, aux_name);
                mesh.remove_channel(aux_name);
                report.merged += 1;
            }
        }
    }

    for (key, main, aux) in &analysis {
        if let Some(main_name) = main {
            if let Some(id) = armature.find(main_name) {
                // A bone already holding the canonical name is displaced,
                // never auto-suffixed around.
                if let Some(occupant) = armature.find(key) {
                    if occupant != id {
                        armature.remove_bone(occupant);
                        report.deleted += 1;
                    }
                }
                armature.rename(id, *key);
                report.renamed += 1;
                // Weight channels follow the bone rename so deform names
                // stay in sync.
                if main_name != key {
                    for mesh in meshes.iter_mut() {
                        if mesh.has_channel(main_name) {
                            if mesh.has_channel(key) {
                                mesh.remove_channel(key);
                            }
                            mesh.rename_channel(main_name, key);
                        }
                    }
                }
            }
        }
        // Aux bones are cleaned up whether or not a main was found; their
        // weight has already been transferred.
        for aux_name in aux {
            if let Some(id) = armature.find(aux_name) {
                armature.remove_bone(id);
                report.deleted += 1;
            }
        }
    }

    Ok(report)
}

/// Counts from a target-naming (Y) pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenameReport {
    /// Bones renamed from canonical keys to target-convention names.
    pub renamed: usize,
}

/// Renames canonical-keyed bones to the target preset's convention.
///
/// Runs over a standardized skeleton: each bone named after a canonical key
/// takes the target entry's first main candidate.
pub fn apply_target_names(armature: &mut Armature, target_preset: &Preset) -> RenameReport {
    let mut report = RenameReport::default();
    for key in taxonomy::STANDARD_BONES {
        let Some(id) = armature.find(key) else { continue };
        let Some(target_name) = target_preset
            .entry(key)
            .and_then(|entry| entry.primary_main())
            .map(str::to_string)
        else {
            continue;
        };
        if target_name == *key {
            continue;
        }
        if let Some(occupant) = armature.find(&target_name) {
            armature.remove_bone(occupant);
        }
        armature.rename(id, target_name);
        report.renamed += 1;
    }
    report
}

/// Counts from a direct X -> Y mesh conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConvertReport {
    /// Rules compiled from the preset pair.
    pub rules: usize,
    /// Meshes whose channels changed.
    pub meshes_updated: usize,
    /// Auxiliary channels merged across all meshes.
    pub merged: usize,
    /// Channels renamed across all meshes.
    pub renamed: usize,
}

/// Converts mesh weight channels from the source convention to the target
/// convention in one pass, without standardizing in between.
pub fn convert_meshes<M: MeshWeights>(
    meshes: &mut [M],
    source_preset: &Preset,
    target_preset: &Preset,
) -> Result<ConvertReport, OpError> {
    if meshes.is_empty() {
        return Err(OpError::Selection("no meshes supplied".to_string()));
    }
    let rules: Vec<ConversionRule> = convert::compile_rules(source_preset, target_preset);
    if rules.is_empty() {
        return Err(OpError::NoSharedMappings);
    }

    let mut report = ConvertReport {
        rules: rules.len(),
        ..ConvertReport::default()
    };
    for mesh in meshes.iter_mut() {
        let mesh_report = convert::apply_rules(mesh, &rules);
        report.merged += mesh_report.merged;
        report.renamed += mesh_report.renamed;
        if mesh_report.changed() {
            report.meshes_updated += 1;
        }
    }
    Ok(report)
}

/// Snaps a target armature's canonical joints onto a source armature.
///
/// The source side is resolved through the source preset (so the two
/// skeletons may follow entirely different conventions); the target side is
/// addressed by the target preset's first main names. Both world transforms
/// are supplied by the caller.
#[allow(clippy::too_many_arguments)]
pub fn snap_skeleton(
    target: &mut Armature,
    target_world: &Transform,
    source: &Armature,
    source_world: &Transform,
    source_preset: &Preset,
    target_preset: &Preset,
    resolver: &Resolver,
    mode: SnapMode,
) -> Result<SnapReport, OpError> {
    let target_inverse = target_world
        .inverse()
        .ok_or(OpError::NonInvertibleTransform)?;

    // Sample resolved source joints in world space before any mutation.
    let mut joints = std::collections::BTreeMap::new();
    for key in taxonomy::STANDARD_BONES {
        let Some(entry) = source_preset.entry(key) else {
            continue;
        };
        let Some(name) = resolver.resolve(source, &entry.main) else {
            continue;
        };
        let Some(bone) = source.find(&name).and_then(|id| source.bone(id)) else {
            continue;
        };
        joints.insert(
            key.to_string(),
            JointSnapshot {
                head: source_world.apply(bone.head),
                tail: source_world.apply(bone.tail),
            },
        );
    }

    Ok(retarget::snap_to_source(
        target,
        &joints,
        target_preset,
        &target_inverse,
        mode,
    ))
}

/// Aligns every same-named bone of `target` to `source`, rigidly dragging
/// descendants. Returns the number of bones aligned.
pub fn align_skeleton_by_name(
    target: &mut Armature,
    target_world: &Transform,
    source: &Armature,
    source_world: &Transform,
    mode: SnapMode,
) -> Result<usize, OpError> {
    let target_inverse = target_world
        .inverse()
        .ok_or(OpError::NonInvertibleTransform)?;
    let joints = retarget::world_joints(source, source_world);
    Ok(retarget::align_by_name(
        target,
        &joints,
        &target_inverse,
        mode,
    ))
}

/// Mirrors the left half of a preset onto its right half.
pub fn mirror_preset_left_to_right(preset: &mut Preset) -> MirrorReport {
    mirror::mirror_preset(preset)
}
