//! Bone name resolution against a concrete skeleton.
//!
//! Skeletons exported from different tools disagree on naming: the same rig
//! family may carry a `MhBone_` or a `bonefunction_` prefix, and some
//! exporters fold case. The resolver matches a preset's candidate names
//! against what a skeleton actually contains, in a fixed fallback order:
//!
//! 1. exact match;
//! 2. the candidate with its prefix-family token swapped;
//! 3. a case-insensitive scan over all bone names (last resort, O(n)).
//!
//! The first candidate that resolves wins; candidates are never aggregated.

use crate::collab::SkeletonNames;
use crate::preset::Preset;

/// Two mutually-exclusive prefix tokens naming physically identical bones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixFamily {
    pub a: String,
    pub b: String,
}

impl Default for PrefixFamily {
    fn default() -> Self {
        Self {
            a: "MhBone_".to_string(),
            b: "bonefunction_".to_string(),
        }
    }
}

impl PrefixFamily {
    /// Returns the name with the other family token substituted, or `None`
    /// if the name carries neither token.
    pub fn swap(&self, name: &str) -> Option<String> {
        if name.contains(&self.a) {
            Some(name.replace(&self.a, &self.b))
        } else if name.contains(&self.b) {
            Some(name.replace(&self.b, &self.a))
        } else {
            None
        }
    }
}

/// Resolves preset candidate names against skeleton bone name sets.
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    prefixes: PrefixFamily,
}

impl Resolver {
    /// Creates a resolver with a custom prefix family.
    pub fn new(prefixes: PrefixFamily) -> Self {
        Self { prefixes }
    }

    /// Resolves an ordered candidate list to a real bone name.
    ///
    /// Candidates are tried in order; the first one that resolves through
    /// any tier is returned.
    pub fn resolve<S: SkeletonNames + ?Sized>(
        &self,
        skeleton: &S,
        candidates: &[String],
    ) -> Option<String> {
        candidates
            .iter()
            .find_map(|candidate| self.resolve_one(skeleton, candidate))
    }

    fn resolve_one<S: SkeletonNames + ?Sized>(
        &self,
        skeleton: &S,
        candidate: &str,
    ) -> Option<String> {
        // Tier 1: exact.
        if skeleton.has_bone(candidate) {
            return Some(candidate.to_string());
        }

        // Tier 2: prefix-family swap.
        let alt = self.prefixes.swap(candidate);
        if let Some(alt_name) = &alt {
            if skeleton.has_bone(alt_name) {
                return Some(alt_name.clone());
            }
        }

        // Tier 3: case-insensitive linear scan, against the candidate and
        // its swapped variant. Only reached when tiers 1-2 miss.
        let folded = candidate.to_lowercase();
        let alt_folded = alt.map(|a| a.to_lowercase());
        skeleton.bone_names().into_iter().find(|name| {
            let lower = name.to_lowercase();
            lower == folded || Some(&lower) == alt_folded.as_ref()
        })
    }

    /// Intersects auxiliary names with the skeleton. Literal presence only,
    /// no fallback tiers; order follows the aux list.
    pub fn resolve_aux<S: SkeletonNames + ?Sized>(
        &self,
        skeleton: &S,
        aux_names: &[String],
    ) -> Vec<String> {
        aux_names
            .iter()
            .filter(|name| skeleton.has_bone(name))
            .cloned()
            .collect()
    }

    /// Resolves one canonical key against a skeleton: the main bone (if any
    /// candidate matches) and the auxiliary bones literally present.
    ///
    /// Auxiliary matching proceeds even when no main candidate resolves; a
    /// key can contribute aux weight with no identified main bone.
    pub fn matches_for_standard<S: SkeletonNames + ?Sized>(
        &self,
        skeleton: &S,
        preset: &Preset,
        key: &str,
    ) -> (Option<String>, Vec<String>) {
        match preset.entry(key) {
            Some(entry) => (
                self.resolve(skeleton, &entry.main),
                self.resolve_aux(skeleton, &entry.aux),
            ),
            None => (None, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::PresetKind;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;

    fn skeleton(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn exact_match_beats_prefix_swap() {
        let skel = skeleton(&["MhBone_004", "bonefunction_004"]);
        let resolver = Resolver::default();
        assert_eq!(
            resolver.resolve(&skel, &candidates(&["MhBone_004"])),
            Some("MhBone_004".to_string())
        );
    }

    #[test]
    fn prefix_swap_fallback() {
        let skel = skeleton(&["bonefunction_004"]);
        let resolver = Resolver::default();
        assert_eq!(
            resolver.resolve(&skel, &candidates(&["MhBone_004"])),
            Some("bonefunction_004".to_string())
        );
    }

    #[test]
    fn case_insensitive_last_resort() {
        let skel = skeleton(&["HIPS"]);
        let resolver = Resolver::default();
        assert_eq!(
            resolver.resolve(&skel, &candidates(&["Hips"])),
            Some("HIPS".to_string())
        );
    }

    #[test]
    fn case_insensitive_matches_swapped_variant() {
        let skel = skeleton(&["BONEFUNCTION_012"]);
        let resolver = Resolver::default();
        assert_eq!(
            resolver.resolve(&skel, &candidates(&["MhBone_012"])),
            Some("BONEFUNCTION_012".to_string())
        );
    }

    #[test]
    fn first_resolving_candidate_wins() {
        let skel = skeleton(&["Bip_Head", "Head"]);
        let resolver = Resolver::default();
        assert_eq!(
            resolver.resolve(&skel, &candidates(&["Missing", "Bip_Head", "Head"])),
            Some("Bip_Head".to_string())
        );
    }

    #[test]
    fn aux_is_literal_intersection() {
        let skel = skeleton(&["Hips_dup", "MhBone_074"]);
        let resolver = Resolver::default();
        let aux = candidates(&["Hips_dup", "Butt_L", "MhBone_074"]);
        assert_eq!(
            resolver.resolve_aux(&skel, &aux),
            vec!["Hips_dup".to_string(), "MhBone_074".to_string()]
        );
        // No case folding for aux.
        assert!(resolver
            .resolve_aux(&skel, &candidates(&["HIPS_DUP"]))
            .is_empty());
    }

    #[test]
    fn aux_matches_without_main() {
        let mut preset = Preset::new("test", PresetKind::Source);
        let entry = preset.entry_mut("pelvis");
        entry.set_main("Hips");
        entry.add_aux("Butt_L");
        let skel = skeleton(&["Butt_L"]);
        let resolver = Resolver::default();
        let (main, aux) = resolver.matches_for_standard(&skel, &preset, "pelvis");
        assert_eq!(main, None);
        assert_eq!(aux, vec!["Butt_L".to_string()]);
    }

    #[test]
    fn custom_prefix_family() {
        let resolver = Resolver::new(PrefixFamily {
            a: "Bip001_".to_string(),
            b: "Bip002_".to_string(),
        });
        let skel = skeleton(&["Bip002_Head"]);
        assert_eq!(
            resolver.resolve(&skel, &candidates(&["Bip001_Head"])),
            Some("Bip002_Head".to_string())
        );
    }
}
