//! Rigid hierarchical retargeting.
//!
//! Moving a joint must not distort the articulation below it: every
//! descendant is translated by the same offset, preserving each bone's local
//! shape. Traversal is an explicit worklist over the arena, never recursion
//! over live references.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::armature::{Armature, BoneId, Transform, Vec3};
use crate::preset::Preset;
use crate::taxonomy;

/// How a snapped bone's tail is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    /// Translate the tail by the head delta: the target bone keeps its own
    /// length and orientation.
    PositionOnly,
    /// Overwrite the tail with the source joint's tail: full pose match,
    /// discarding the target's original shape.
    PoseMatch,
}

/// A joint's head and tail sampled in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointSnapshot {
    pub head: Vec3,
    pub tail: Vec3,
}

/// Samples every bone of an armature into world space, keyed by bone name.
pub fn world_joints(armature: &Armature, world: &Transform) -> BTreeMap<String, JointSnapshot> {
    armature
        .bones()
        .map(|(_, bone)| {
            (
                bone.name.clone(),
                JointSnapshot {
                    head: world.apply(bone.head),
                    tail: world.apply(bone.tail),
                },
            )
        })
        .collect()
}

/// Rigidly translates every descendant of `root` by `offset`.
///
/// A child pinned to its parent's tail (`use_connect`) only has its tail
/// moved explicitly; its head is the parent's tail and has already moved.
/// Unpinned children have both ends moved. Descent is unconditional: this is
/// a pure translation of the subtree, not a re-solve.
///
/// Precondition: the hierarchy is a finite acyclic tree (guaranteed by
/// [`Armature`] construction).
pub fn propagate(armature: &mut Armature, root: BoneId, offset: Vec3) {
    let mut pending = armature.children(root);
    while let Some(id) = pending.pop() {
        pending.extend(armature.children(id));
        if let Some(bone) = armature.bone_mut(id) {
            if !bone.use_connect {
                bone.head += offset;
            }
            bone.tail += offset;
        }
    }
}

/// Counts of a snap pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SnapReport {
    /// Keys whose target bone was moved to its source position.
    pub aligned: usize,
    /// Keys resolved on one side only.
    pub skipped: usize,
}

fn snap_bone(
    armature: &mut Armature,
    id: BoneId,
    sample: JointSnapshot,
    world_inverse: &Transform,
    mode: SnapMode,
) -> bool {
    let new_head = world_inverse.apply(sample.head);
    let new_tail = world_inverse.apply(sample.tail);
    let Some(bone) = armature.bone_mut(id) else {
        return false;
    };
    let offset = new_head - bone.head;
    bone.head = new_head;
    match mode {
        SnapMode::PositionOnly => bone.tail += offset,
        SnapMode::PoseMatch => bone.tail = new_tail,
    }
    propagate(armature, id, offset);
    true
}

/// Moves a target armature's canonical joints onto source world positions.
///
/// Keys are processed in taxonomy order, parents before children: when both
/// a parent and its child are resolved, the parent's propagation drags the
/// child first and the child's own later snap overrides that approximate
/// position. A key sampled on one side but unresolved on the other is
/// skipped and tallied; keys absent from both sides are ignored.
pub fn snap_to_source(
    target: &mut Armature,
    source_joints: &BTreeMap<String, JointSnapshot>,
    target_preset: &Preset,
    target_world_inverse: &Transform,
    mode: SnapMode,
) -> SnapReport {
    let mut report = SnapReport::default();

    for key in taxonomy::STANDARD_BONES {
        let sample = source_joints.get(*key);
        let target_id = target_preset
            .entry(key)
            .and_then(|entry| entry.primary_main())
            .and_then(|name| target.find(name));

        match (sample, target_id) {
            (Some(sample), Some(id)) => {
                if snap_bone(target, id, *sample, target_world_inverse, mode) {
                    report.aligned += 1;
                } else {
                    report.skipped += 1;
                }
            }
            (Some(_), None) | (None, Some(_)) => report.skipped += 1,
            (None, None) => {}
        }
    }

    report
}

/// Aligns every target bone whose name also exists in the source snapshot.
///
/// The iteration order is storage order, not hierarchy order; a same-named
/// child processed after its parent overrides the propagated approximation
/// with its own exact position, which is the wanted end state.
pub fn align_by_name(
    target: &mut Armature,
    source_joints: &BTreeMap<String, JointSnapshot>,
    target_world_inverse: &Transform,
    mode: SnapMode,
) -> usize {
    let ids: Vec<BoneId> = target.bones().map(|(id, _)| id).collect();
    let mut aligned = 0;
    for id in ids {
        let Some(sample) = target
            .bone(id)
            .and_then(|bone| source_joints.get(&bone.name))
            .copied()
        else {
            continue;
        };
        if snap_bone(target, id, sample, target_world_inverse, mode) {
            aligned += 1;
        }
    }
    aligned
}
