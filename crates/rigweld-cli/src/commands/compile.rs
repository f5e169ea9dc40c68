//! Compile command implementation
//!
//! Compiles and prints the conversion rules for a source/target preset
//! pair without touching any rig.

use anyhow::Result;
use colored::Colorize;
use rigweld_core::{compile_rules, ConversionRule, PresetKind};
use serde::Serialize;
use std::process::ExitCode;

#[derive(Debug, Serialize)]
struct RuleOutput {
    key: String,
    source_mains: Vec<String>,
    source_aux: Vec<String>,
    target: String,
}

#[derive(Debug, Serialize)]
struct CompileOutput {
    success: bool,
    rules: Vec<RuleOutput>,
}

/// Run the compile command.
///
/// Exit code: 0 if at least one rule compiles, 1 if the presets share no
/// usable mappings.
pub fn run(source_path: &str, target_path: &str, json_output: bool) -> Result<ExitCode> {
    let source = super::load_preset(source_path, Some(PresetKind::Source))?;
    let target = super::load_preset(target_path, Some(PresetKind::Target))?;

    let rules = compile_rules(&source, &target);
    if rules.is_empty() {
        if json_output {
            let output = CompileOutput {
                success: false,
                rules: vec![],
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            eprintln!(
                "{} presets share no usable mappings",
                "error:".red().bold()
            );
        }
        return Ok(ExitCode::from(1));
    }

    if json_output {
        let output = CompileOutput {
            success: true,
            rules: rules.iter().map(rule_output).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "{} {} -> {}",
            "Compiling:".cyan().bold(),
            source.info.name,
            target.info.name
        );
        for rule in &rules {
            let aux = if rule.source_aux.is_empty() {
                String::new()
            } else {
                format!(" (+{} aux)", rule.source_aux.len())
            };
            println!(
                "  {} {}: {} -> {}{}",
                ">".dimmed(),
                rule.key,
                rule.source_mains.join(" | "),
                rule.target_name,
                aux.dimmed()
            );
        }
        println!("\n{} {} rule(s)", "SUCCESS".green().bold(), rules.len());
    }

    Ok(ExitCode::SUCCESS)
}

fn rule_output(rule: &ConversionRule) -> RuleOutput {
    RuleOutput {
        key: rule.key.clone(),
        source_mains: rule.source_mains.clone(),
        source_aux: rule.source_aux.clone(),
        target: rule.target_name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigweld_core::Preset;

    fn save(dir: &tempfile::TempDir, file: &str, preset: &Preset) -> std::path::PathBuf {
        let path = dir.path().join(file);
        preset.save(&path).unwrap();
        path
    }

    #[test]
    fn compile_prints_shared_rules() {
        let tmp = tempfile::tempdir().unwrap();
        let mut source = Preset::new("vrc", PresetKind::Source);
        source.entry_mut("pelvis").set_main("Hips");
        let mut target = Preset::new("mhwi", PresetKind::Target);
        target.entry_mut("pelvis").set_main("MhBone_013");
        let source_path = save(&tmp, "x.json", &source);
        let target_path = save(&tmp, "y.json", &target);

        let code = run(
            source_path.to_str().unwrap(),
            target_path.to_str().unwrap(),
            false,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn compile_fails_without_shared_mappings() {
        let tmp = tempfile::tempdir().unwrap();
        let mut source = Preset::new("vrc", PresetKind::Source);
        source.entry_mut("pelvis").set_main("Hips");
        let mut target = Preset::new("mhwi", PresetKind::Target);
        target.entry_mut("head").set_main("MhBone_004");
        let source_path = save(&tmp, "x.json", &source);
        let target_path = save(&tmp, "y.json", &target);

        let code = run(
            source_path.to_str().unwrap(),
            target_path.to_str().unwrap(),
            true,
        )
        .unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn compile_rejects_swapped_kinds() {
        let tmp = tempfile::tempdir().unwrap();
        let target = Preset::new("mhwi", PresetKind::Target);
        let path = save(&tmp, "y.json", &target);

        let err = run(path.to_str().unwrap(), path.to_str().unwrap(), false).unwrap_err();
        assert!(format!("{:#}", err).contains("X_PRESET"));
    }
}
