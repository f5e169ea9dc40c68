//! Armature arena: bone records indexed by stable handles.
//!
//! Bones live in a slot arena and reference each other by [`BoneId`], never
//! by live references; children are derived by scanning parent links. Ids
//! stay valid across removals (slots are tombstoned, not compacted).

use serde::{Deserialize, Serialize};

use crate::collab::SkeletonNames;

/// A 3D point or vector, serialized as `[x, y, z]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vec3> for [f64; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self = *self - rhs;
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

/// An affine world transform: 3x3 linear part (rows) plus translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Row-major linear part.
    pub basis: [[f64; 3]; 3],
    /// Translation applied after the linear part.
    #[serde(default)]
    pub translation: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            basis: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            translation: Vec3::ZERO,
        }
    }

    /// A pure translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    /// Applies the transform to a point.
    pub fn apply(&self, p: Vec3) -> Vec3 {
        let b = &self.basis;
        Vec3::new(
            b[0][0] * p.x + b[0][1] * p.y + b[0][2] * p.z,
            b[1][0] * p.x + b[1][1] * p.y + b[1][2] * p.z,
            b[2][0] * p.x + b[2][1] * p.y + b[2][2] * p.z,
        ) + self.translation
    }

    /// Returns the inverse transform, or `None` when the linear part is
    /// singular.
    pub fn inverse(&self) -> Option<Transform> {
        let b = &self.basis;
        let det = b[0][0] * (b[1][1] * b[2][2] - b[1][2] * b[2][1])
            - b[0][1] * (b[1][0] * b[2][2] - b[1][2] * b[2][0])
            + b[0][2] * (b[1][0] * b[2][1] - b[1][1] * b[2][0]);
        if det.abs() < 1e-12 {
            return None;
        }
        let inv_det = 1.0 / det;
        let basis = [
            [
                (b[1][1] * b[2][2] - b[1][2] * b[2][1]) * inv_det,
                (b[0][2] * b[2][1] - b[0][1] * b[2][2]) * inv_det,
                (b[0][1] * b[1][2] - b[0][2] * b[1][1]) * inv_det,
            ],
            [
                (b[1][2] * b[2][0] - b[1][0] * b[2][2]) * inv_det,
                (b[0][0] * b[2][2] - b[0][2] * b[2][0]) * inv_det,
                (b[0][2] * b[1][0] - b[0][0] * b[1][2]) * inv_det,
            ],
            [
                (b[1][0] * b[2][1] - b[1][1] * b[2][0]) * inv_det,
                (b[0][1] * b[2][0] - b[0][0] * b[2][1]) * inv_det,
                (b[0][0] * b[1][1] - b[0][1] * b[1][0]) * inv_det,
            ],
        ];
        let inverted = Transform {
            basis,
            translation: Vec3::ZERO,
        };
        let translation = -inverted.apply(self.translation);
        Some(Transform { basis, translation })
    }
}

/// Stable handle to a bone in an [`Armature`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoneId(usize);

/// A bone record in the rigid hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    /// Unique name within the armature.
    pub name: String,
    /// Head position in armature-local space.
    pub head: Vec3,
    /// Tail position in armature-local space.
    pub tail: Vec3,
    /// Roll around the bone's own axis, in radians.
    pub roll: f64,
    /// Owning parent, or `None` for a root.
    pub parent: Option<BoneId>,
    /// When true, this bone's head is rigidly pinned to its parent's tail.
    pub use_connect: bool,
}

impl Bone {
    /// The bone's local shape vector (tail minus head).
    pub fn vector(&self) -> Vec3 {
        self.tail - self.head
    }

    /// The bone's length.
    pub fn length(&self) -> f64 {
        self.vector().length()
    }
}

/// A skeleton's bone arena.
///
/// Precondition: parent links form a finite, acyclic forest. This is
/// guaranteed by construction (a bone's parent must already exist when the
/// bone is added) and is not re-validated by traversals.
#[derive(Debug, Clone, Default)]
pub struct Armature {
    slots: Vec<Option<Bone>>,
}

impl Armature {
    /// Creates an empty armature.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bone and returns its handle. Roll defaults to 0 and the bone
    /// starts unconnected; adjust through [`Armature::bone_mut`].
    pub fn add_bone(
        &mut self,
        name: impl Into<String>,
        head: Vec3,
        tail: Vec3,
        parent: Option<BoneId>,
    ) -> BoneId {
        let id = BoneId(self.slots.len());
        self.slots.push(Some(Bone {
            name: name.into(),
            head,
            tail,
            roll: 0.0,
            parent,
            use_connect: false,
        }));
        id
    }

    /// Number of live bones.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// True when the armature has no bones.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared access to a bone. `None` if the slot was removed.
    pub fn bone(&self, id: BoneId) -> Option<&Bone> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Mutable access to a bone.
    pub fn bone_mut(&mut self, id: BoneId) -> Option<&mut Bone> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// Iterates live bones with their handles.
    pub fn bones(&self) -> impl Iterator<Item = (BoneId, &Bone)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|b| (BoneId(i), b)))
    }

    /// Exact-name lookup.
    pub fn find(&self, name: &str) -> Option<BoneId> {
        self.bones()
            .find_map(|(id, bone)| (bone.name == name).then_some(id))
    }

    /// Direct children of a bone, derived from parent links.
    pub fn children(&self, id: BoneId) -> Vec<BoneId> {
        self.bones()
            .filter_map(|(child, bone)| (bone.parent == Some(id)).then_some(child))
            .collect()
    }

    /// Bones without a parent.
    pub fn roots(&self) -> Vec<BoneId> {
        self.bones()
            .filter_map(|(id, bone)| bone.parent.is_none().then_some(id))
            .collect()
    }

    /// Renames a bone. Returns false if the handle is stale.
    pub fn rename(&mut self, id: BoneId, name: impl Into<String>) -> bool {
        match self.bone_mut(id) {
            Some(bone) => {
                bone.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Removes a bone, reparenting its children to the removed bone's
    /// parent. Reparented children keep their positions, so a head pinned to
    /// the removed bone's tail is unpinned.
    pub fn remove_bone(&mut self, id: BoneId) -> bool {
        let Some(removed) = self.slots.get_mut(id.0).and_then(Option::take) else {
            return false;
        };
        for bone in self.slots.iter_mut().flatten() {
            if bone.parent == Some(id) {
                bone.parent = removed.parent;
                bone.use_connect = false;
            }
        }
        true
    }

    /// Sets roll to zero across each given root's subtree (roots included).
    /// Returns the number of bones touched.
    pub fn zero_roll_recursive(&mut self, roots: &[BoneId]) -> usize {
        let mut pending: Vec<BoneId> = roots.to_vec();
        let mut seen = std::collections::BTreeSet::new();
        while let Some(id) = pending.pop() {
            if !seen.insert(id.0) {
                continue;
            }
            pending.extend(self.children(id));
            if let Some(bone) = self.bone_mut(id) {
                bone.roll = 0.0;
            }
        }
        seen.len()
    }

    /// Adds a vertical helper child at a bone's tail, named `<bone>_tail`.
    /// The helper points up along Z with the parent's length (0.1 when the
    /// parent is zero-length).
    pub fn add_tail_bone(&mut self, id: BoneId) -> Option<BoneId> {
        let (name, tail, length) = {
            let bone = self.bone(id)?;
            (format!("{}_tail", bone.name), bone.tail, bone.length())
        };
        let length = if length > 0.0 { length } else { 0.1 };
        Some(self.add_bone(name, tail, tail + Vec3::new(0.0, 0.0, length), Some(id)))
    }
}

impl SkeletonNames for Armature {
    fn bone_names(&self) -> Vec<String> {
        self.bones().map(|(_, bone)| bone.name.clone()).collect()
    }

    fn has_bone(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}
