//! Collaborator interfaces consumed by the core.
//!
//! The core never owns skeleton or mesh data: skeletons are read through
//! [`SkeletonNames`], and per-vertex weight storage stays behind
//! [`MeshWeights`]. In particular the additive weight accumulation loop is a
//! host capability; the core only sequences merge/remove/rename calls.

/// Read-only view of a skeleton's bone name set.
pub trait SkeletonNames {
    /// Enumerates every bone name in the skeleton.
    fn bone_names(&self) -> Vec<String>;

    /// Exact-name membership test.
    fn has_bone(&self, name: &str) -> bool {
        self.bone_names().iter().any(|n| n == name)
    }
}

impl SkeletonNames for std::collections::BTreeSet<String> {
    fn bone_names(&self) -> Vec<String> {
        self.iter().cloned().collect()
    }

    fn has_bone(&self, name: &str) -> bool {
        self.contains(name)
    }
}

/// Named per-vertex weight channels on a mesh.
pub trait MeshWeights {
    /// Enumerates the channel names on this mesh.
    fn channel_names(&self) -> Vec<String>;

    /// Channel existence test.
    fn has_channel(&self, name: &str) -> bool {
        self.channel_names().iter().any(|n| n == name)
    }

    /// Creates an empty channel. No-op if it already exists.
    fn create_channel(&mut self, name: &str);

    /// Removes a channel and its weights. No-op if absent.
    fn remove_channel(&mut self, name: &str);

    /// Renames a channel. No-op if `from` is absent.
    fn rename_channel(&mut self, from: &str, to: &str);

    /// Adds `source`'s per-vertex weights into `target`, creating `target`
    /// if needed. Removal of `source` is left to the caller.
    fn merge_additive(&mut self, target: &str, source: &str);
}
