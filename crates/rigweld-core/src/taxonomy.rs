//! The standard bone taxonomy.
//!
//! A fixed, ordered catalogue of canonical bone keys describing a
//! game-agnostic humanoid rig. Presets map these keys onto the bone names a
//! concrete skeleton actually uses; every batch operation walks the keys in
//! the order they appear here, so parents are authored before children.

/// Canonical bone keys in processing order.
///
/// Sided keys carry an `_L`/`_R` suffix so one half of a preset can be
/// mirrored onto the other.
pub const STANDARD_BONES: &[&str] = &[
    // Core
    "root",
    "pelvis",
    "spine_01",
    "spine_02",
    "spine_03",
    "neck_01",
    "head",
    // Left arm
    "clavicle_L",
    "upperarm_L",
    "lowerarm_L",
    "hand_L",
    // Left hand fingers
    "thumb_01_L",
    "thumb_02_L",
    "thumb_03_L",
    "index_01_L",
    "index_02_L",
    "index_03_L",
    "middle_01_L",
    "middle_02_L",
    "middle_03_L",
    "ring_01_L",
    "ring_02_L",
    "ring_03_L",
    "pinky_01_L",
    "pinky_02_L",
    "pinky_03_L",
    // Right arm
    "clavicle_R",
    "upperarm_R",
    "lowerarm_R",
    "hand_R",
    // Right hand fingers
    "thumb_01_R",
    "thumb_02_R",
    "thumb_03_R",
    "index_01_R",
    "index_02_R",
    "index_03_R",
    "middle_01_R",
    "middle_02_R",
    "middle_03_R",
    "ring_01_R",
    "ring_02_R",
    "ring_03_R",
    "pinky_01_R",
    "pinky_02_R",
    "pinky_03_R",
    // Left leg
    "thigh_L",
    "calf_L",
    "foot_L",
    "ball_L",
    // Right leg
    "thigh_R",
    "calf_R",
    "foot_R",
    "ball_R",
];

/// Returns true if `key` is a canonical bone key.
pub fn is_standard(key: &str) -> bool {
    STANDARD_BONES.contains(&key)
}

/// Enumerates the `(left, right)` canonical key pairs, in taxonomy order.
///
/// A pair exists for every `_L` key whose `_R` counterpart is also in the
/// catalogue.
pub fn left_right_pairs() -> impl Iterator<Item = (&'static str, &'static str)> {
    STANDARD_BONES.iter().filter_map(|left| {
        let stem = left.strip_suffix("_L")?;
        let right = STANDARD_BONES
            .iter()
            .find(|k| k.strip_suffix("_R") == Some(stem))?;
        Some((*left, *right))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn keys_are_unique() {
        let mut seen = std::collections::BTreeSet::new();
        for key in STANDARD_BONES {
            assert!(seen.insert(*key), "duplicate canonical key: {}", key);
        }
    }

    #[test]
    fn parents_precede_children() {
        let pos = |key: &str| {
            STANDARD_BONES
                .iter()
                .position(|k| *k == key)
                .unwrap_or_else(|| panic!("missing key: {}", key))
        };
        assert!(pos("pelvis") < pos("spine_01"));
        assert!(pos("spine_03") < pos("clavicle_L"));
        assert!(pos("upperarm_L") < pos("hand_L"));
        assert!(pos("hand_R") < pos("thumb_01_R"));
        assert!(pos("thigh_L") < pos("foot_L"));
    }

    #[test]
    fn pairs_are_complete() {
        let pairs: Vec<_> = left_right_pairs().collect();
        assert!(pairs.contains(&("upperarm_L", "upperarm_R")));
        assert!(pairs.contains(&("thumb_01_L", "thumb_01_R")));
        assert!(pairs.contains(&("ball_L", "ball_R")));
        // Every pair member is a real key.
        for (left, right) in &pairs {
            assert!(is_standard(left));
            assert!(is_standard(right));
        }
        let left_count = STANDARD_BONES
            .iter()
            .filter(|k| k.ends_with("_L"))
            .count();
        assert_eq!(pairs.len(), left_count);
    }
}
