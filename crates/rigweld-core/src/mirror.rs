//! Mirror name transform: derive a right-side bone name from its left-side
//! counterpart (and vice versa).
//!
//! The rule table is an ordered contract, not an incidental storage order:
//! rules are evaluated top-down and the first whose pattern occurs in the
//! name is applied, even if a later rule would also match. A name the table
//! leaves unchanged is "not side-specific" and must not be force-mirrored.

use regex::Regex;
use std::sync::OnceLock;

use crate::preset::Preset;
use crate::taxonomy;

/// Literal substitution rules, most specific separators first.
pub const MIRROR_RULES: &[(&str, &str)] = &[
    ("_L_", "_R_"),
    ("_L.", "_R."),
    ("_L", "_R"),
    (".L", ".R"),
    (" L ", " R "),
    ("Left", "Right"),
    ("left", "right"),
    ("Lf", "Rt"),
    ("(L)", "(R)"),
];

fn positional_rule() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // An `L` counts as a side marker only when an uppercase letter follows
    // and a digit or the start of the string precedes it, e.g. "Bip001LThigh"
    // or "LThigh". Anything looser would mutate ordinary words.
    RE.get_or_init(|| Regex::new(r"(^|[0-9])L([A-Z])").expect("valid mirror regex"))
}

/// Returns the opposite-side counterpart of `name`, or `None` when the name
/// is not side-specific.
pub fn mirror_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }

    // Stage 1: literal separators, first match wins.
    for (pattern, replacement) in MIRROR_RULES {
        if name.contains(pattern) {
            return Some(name.replace(pattern, replacement));
        }
    }

    // Stage 2: positional pattern for compact/camel-case names.
    let swapped = positional_rule().replace_all(name, "${1}R${2}");
    if swapped != name {
        return Some(swapped.into_owned());
    }

    None
}

/// Report of a preset mirroring pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct MirrorReport {
    /// Main and auxiliary names written to right-side entries.
    pub updated: usize,
}

/// Rewrites the right-side half of a preset from its left-side half.
///
/// For every `_L`/`_R` canonical key pair: the right entry's main name is
/// overwritten only when the left main mirrors to a different name, and the
/// right entry's auxiliary list is fully replaced by the mirrored image of
/// the left list (non-mirrorable aux names are dropped).
pub fn mirror_preset(preset: &mut Preset) -> MirrorReport {
    let mut report = MirrorReport::default();

    for (left_key, right_key) in taxonomy::left_right_pairs() {
        let Some(left) = preset.entry(left_key).cloned() else {
            continue;
        };

        if let Some(mirrored) = left.primary_main().and_then(mirror_name) {
            preset.entry_mut(right_key).set_main(mirrored);
            report.updated += 1;
        }

        if !left.aux.is_empty() {
            // Destructive overwrite of the right aux set, not a merge.
            let entry = preset.entry_mut(right_key);
            entry.aux.clear();
            for aux in &left.aux {
                if let Some(mirrored) = mirror_name(aux) {
                    if entry.add_aux(mirrored) {
                        report.updated += 1;
                    }
                }
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preset::PresetKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn literal_separator_rules() {
        assert_eq!(mirror_name("upperarm_L"), Some("upperarm_R".to_string()));
        assert_eq!(mirror_name("hand_L_01"), Some("hand_R_01".to_string()));
        assert_eq!(mirror_name("Shoulder.L"), Some("Shoulder.R".to_string()));
        assert_eq!(mirror_name("LeftArm"), Some("RightArm".to_string()));
        assert_eq!(mirror_name("ArmLf"), Some("ArmRt".to_string()));
        assert_eq!(mirror_name("Arm (L)"), Some("Arm (R)".to_string()));
    }

    #[test]
    fn positional_rule_compact_names() {
        assert_eq!(
            mirror_name("Bip001LThigh"),
            Some("Bip001RThigh".to_string())
        );
        assert_eq!(mirror_name("LThigh"), Some("RThigh".to_string()));
        assert_eq!(mirror_name("1LTwist"), Some("1RTwist".to_string()));
    }

    #[test]
    fn non_directional_names_return_none() {
        assert_eq!(mirror_name("Spine_02"), None);
        assert_eq!(mirror_name("Head"), None);
        assert_eq!(mirror_name(""), None);
        // Lowercase follower: not a side marker.
        assert_eq!(mirror_name("Lamp"), None);
    }

    #[test]
    fn first_match_wins_over_later_rules() {
        // "_L" fires before "Left" ever gets a chance.
        assert_eq!(mirror_name("Arm_Left"), Some("Arm_Reft".to_string()));
    }

    #[test]
    fn preset_mirror_main_and_aux() {
        let mut preset = Preset::new("test", PresetKind::Source);
        let left = preset.entry_mut("upperarm_L");
        left.set_main("UpperArm_L");
        left.add_aux("UpperArmTwist_L");
        left.add_aux("UpperArmHelp_L");
        // Stale right-side data the mirror must replace.
        let right = preset.entry_mut("upperarm_R");
        right.set_main("OldName");
        right.add_aux("Stale_R");

        let report = mirror_preset(&mut preset);

        let right = preset.entry("upperarm_R").unwrap();
        assert_eq!(right.main, vec!["UpperArm_R"]);
        assert_eq!(right.aux, vec!["UpperArmTwist_R", "UpperArmHelp_R"]);
        assert_eq!(report.updated, 3);
    }

    #[test]
    fn non_directional_main_does_not_overwrite_right() {
        let mut preset = Preset::new("test", PresetKind::Source);
        preset.entry_mut("thigh_L").set_main("Spine");
        preset.entry_mut("thigh_R").set_main("Keep_R");

        mirror_preset(&mut preset);

        assert_eq!(preset.entry("thigh_R").unwrap().main, vec!["Keep_R"]);
    }
}
