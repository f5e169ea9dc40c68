//! Conversion rule compilation and application.
//!
//! Two presets that share the standard taxonomy can be diffed into a rule
//! list that retargets a concrete mesh from convention X to convention Y.
//! Rules are derived per pass and never persisted.

use serde::Serialize;

use crate::collab::MeshWeights;
use crate::preset::Preset;
use crate::taxonomy;

/// One retargeting step: where a canonical key's weight lives on the source
/// convention and what it must be called on the target convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionRule {
    /// Canonical key this rule was derived from.
    pub key: String,
    /// Ordered source main candidates; a mesh may carry any one of them.
    pub source_mains: Vec<String>,
    /// Source auxiliary names to fold into the resolved main.
    pub source_aux: Vec<String>,
    /// Authoritative output name (the target entry's first main candidate).
    pub target_name: String,
}

/// Compiles the rule list for a source/target preset pair, in taxonomy
/// order.
///
/// A key is skipped when either preset lacks an entry for it or has an empty
/// main-candidate list. Emission order matters: callers apply rules
/// sequentially, and later rules may reference channels earlier ones
/// renamed.
pub fn compile_rules(source: &Preset, target: &Preset) -> Vec<ConversionRule> {
    let mut rules = Vec::new();
    for key in taxonomy::STANDARD_BONES {
        let Some(src) = source.entry(key) else { continue };
        let Some(tgt) = target.entry(key) else { continue };
        let Some(target_name) = tgt.primary_main() else {
            continue;
        };
        if src.main.is_empty() {
            continue;
        }
        rules.push(ConversionRule {
            key: key.to_string(),
            source_mains: src.main.clone(),
            source_aux: src.aux.clone(),
            target_name: target_name.to_string(),
        });
    }
    rules
}

/// Per-mesh outcome of a rule application pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MeshConvertReport {
    /// Auxiliary channels merged and removed.
    pub merged: usize,
    /// Channels renamed to their target names.
    pub renamed: usize,
}

impl MeshConvertReport {
    /// True when the pass touched the mesh at all.
    pub fn changed(&self) -> bool {
        self.merged > 0 || self.renamed > 0
    }
}

/// Applies a compiled rule list to one mesh's weight channels.
///
/// Per rule: the first source candidate present on the mesh is the merge
/// destination; when none is present, orphaned aux weight lands on the
/// rule's target name instead of being dropped. Aux channels are merged
/// additively and removed, then the resolved source channel is renamed to
/// the target name, displacing any pre-existing occupant of that name.
pub fn apply_rules<M: MeshWeights>(mesh: &mut M, rules: &[ConversionRule]) -> MeshConvertReport {
    let mut report = MeshConvertReport::default();

    for rule in rules {
        let real_main = rule
            .source_mains
            .iter()
            .find(|candidate| mesh.has_channel(candidate))
            .cloned();
        let destination = real_main
            .clone()
            .unwrap_or_else(|| rule.target_name.clone());

        let present_aux: Vec<String> = rule
            .source_aux
            .iter()
            .filter(|aux| mesh.has_channel(aux))
            .cloned()
            .collect();
        if !present_aux.is_empty() {
            if !mesh.has_channel(&destination) {
                mesh.create_channel(&destination);
            }
            for aux in &present_aux {
                mesh.merge_additive(&destination, aux);
                mesh.remove_channel(aux);
                report.merged += 1;
            }
        }

        if let Some(main) = real_main {
            // Renaming onto an equal name is a no-op, not an error.
            if main != rule.target_name {
                if mesh.has_channel(&rule.target_name) {
                    mesh.remove_channel(&rule.target_name);
                }
                mesh.rename_channel(&main, &rule.target_name);
                report.renamed += 1;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::PresetKind;
    use crate::test_support::MockMesh;
    use pretty_assertions::assert_eq;

    fn preset(kind: PresetKind, entries: &[(&str, &[&str], &[&str])]) -> Preset {
        let mut preset = Preset::new("test", kind);
        for (key, mains, auxs) in entries {
            let entry = preset.entry_mut(key);
            entry.main = mains.iter().map(|m| m.to_string()).collect();
            for aux in *auxs {
                entry.add_aux(*aux);
            }
        }
        preset
    }

    #[test]
    fn compiles_shared_keys_only() {
        let source = preset(
            PresetKind::Source,
            &[
                ("head", &["Bip_Head", "Head"], &[]),
                ("pelvis", &["Hips"], &[]),
                ("neck_01", &[], &["NeckHelper"]),
            ],
        );
        let target = preset(
            PresetKind::Target,
            &[("head", &["MhBone_004"], &[]), ("neck_01", &["MhBone_003"], &[])],
        );

        let rules = compile_rules(&source, &target);

        assert_eq!(
            rules,
            vec![ConversionRule {
                key: "head".to_string(),
                source_mains: vec!["Bip_Head".to_string(), "Head".to_string()],
                source_aux: vec![],
                target_name: "MhBone_004".to_string(),
            }]
        );
    }

    #[test]
    fn rules_follow_taxonomy_order() {
        let entries: &[(&str, &[&str], &[&str])] = &[
            ("hand_L", &["LeftHand"], &[]),
            ("pelvis", &["Hips"], &[]),
            ("head", &["Head"], &[]),
        ];
        let source = preset(PresetKind::Source, entries);
        let target = preset(
            PresetKind::Target,
            &[
                ("hand_L", &["MhBone_008"], &[]),
                ("pelvis", &["MhBone_013"], &[]),
                ("head", &["MhBone_004"], &[]),
            ],
        );

        let rules = compile_rules(&source, &target);
        let keys: Vec<&str> = rules.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["pelvis", "head", "hand_L"]);
    }

    #[test]
    fn merge_and_rename_on_mesh() {
        let source = preset(
            PresetKind::Source,
            &[("upperarm_L", &["UpperArm_L", "Left Arm"], &["ArmTwist_L"])],
        );
        let target = preset(PresetKind::Target, &[("upperarm_L", &["MhBone_080"], &[])]);
        let rules = compile_rules(&source, &target);

        let mut mesh = MockMesh::default();
        mesh.set("Left Arm", &[(0, 0.5), (1, 0.25)]);
        mesh.set("ArmTwist_L", &[(1, 0.25), (2, 1.0)]);

        let report = apply_rules(&mut mesh, &rules);

        assert_eq!(report.merged, 1);
        assert_eq!(report.renamed, 1);
        assert!(!mesh.has_channel("Left Arm"));
        assert!(!mesh.has_channel("ArmTwist_L"));
        assert_eq!(
            mesh.weights("MhBone_080"),
            vec![(0, 0.5), (1, 0.5), (2, 1.0)]
        );
    }

    #[test]
    fn orphaned_aux_lands_on_target_name() {
        let source = preset(
            PresetKind::Source,
            &[("thigh_L", &["LeftLeg"], &["LegTwist_L"])],
        );
        let target = preset(PresetKind::Target, &[("thigh_L", &["MhBone_014"], &[])]);
        let rules = compile_rules(&source, &target);

        // Glove mesh: no leg main, only stray twist weight.
        let mut mesh = MockMesh::default();
        mesh.set("LegTwist_L", &[(7, 0.8)]);

        let report = apply_rules(&mut mesh, &rules);

        assert_eq!(report.merged, 1);
        assert_eq!(report.renamed, 0);
        assert_eq!(mesh.weights("MhBone_014"), vec![(7, 0.8)]);
    }

    #[test]
    fn rename_displaces_existing_occupant() {
        let source = preset(PresetKind::Source, &[("head", &["Head"], &[])]);
        let target = preset(PresetKind::Target, &[("head", &["MhBone_004"], &[])]);
        let rules = compile_rules(&source, &target);

        let mut mesh = MockMesh::default();
        mesh.set("Head", &[(0, 1.0)]);
        mesh.set("MhBone_004", &[(5, 0.5)]);

        apply_rules(&mut mesh, &rules);

        // The occupant is removed, never auto-suffixed.
        assert_eq!(mesh.channel_names(), vec!["MhBone_004"]);
        assert_eq!(mesh.weights("MhBone_004"), vec![(0, 1.0)]);
    }

    #[test]
    fn equal_names_are_a_no_op() {
        let source = preset(PresetKind::Source, &[("head", &["Head"], &[])]);
        let target = preset(PresetKind::Target, &[("head", &["Head"], &[])]);
        let rules = compile_rules(&source, &target);

        let mut mesh = MockMesh::default();
        mesh.set("Head", &[(0, 1.0)]);

        let report = apply_rules(&mut mesh, &rules);
        assert!(!report.changed());
        assert_eq!(mesh.weights("Head"), vec![(0, 1.0)]);
    }
}
