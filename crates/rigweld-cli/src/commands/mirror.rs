//! Mirror command implementation
//!
//! Mirrors the left half of a preset onto its right half and writes the
//! result back (in place, or to `--output`).

use anyhow::{Context, Result};
use colored::Colorize;
use rigweld_core::ops;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

#[derive(Debug, Serialize)]
struct MirrorOutput {
    success: bool,
    updated: usize,
    output: String,
}

/// Run the mirror command.
pub fn run(preset_path: &str, output: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let mut preset = super::load_preset(preset_path, None)?;

    let report = ops::mirror_preset_left_to_right(&mut preset);

    let out_path = output.unwrap_or(preset_path);
    preset
        .save(Path::new(out_path))
        .with_context(|| format!("failed to write preset: {}", out_path))?;

    if json_output {
        let output = MirrorOutput {
            success: true,
            updated: report.updated,
            output: out_path.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Mirroring:".cyan().bold(), preset_path);
        println!("{} {}", "Entries updated:".dimmed(), report.updated);
        println!("\n{} Written to {}", "SUCCESS".green().bold(), out_path);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rigweld_core::{Preset, PresetKind};

    #[test]
    fn mirror_writes_right_side_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let mut preset = Preset::new("vrc", PresetKind::Source);
        preset.entry_mut("hand_L").set_main("Hand_L");
        let in_path = tmp.path().join("preset.json");
        let out_path = tmp.path().join("mirrored.json");
        preset.save(&in_path).unwrap();

        let code = run(
            in_path.to_str().unwrap(),
            Some(out_path.to_str().unwrap()),
            false,
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let mirrored = Preset::load(&out_path, None).unwrap();
        assert_eq!(
            mirrored.entry("hand_R").unwrap().primary_main(),
            Some("Hand_R")
        );
        // Input file untouched when --output is given.
        let original = Preset::load(&in_path, None).unwrap();
        assert!(original.entry("hand_R").is_none());
    }

    #[test]
    fn mirror_in_place_overwrites_input() {
        let tmp = tempfile::tempdir().unwrap();
        let mut preset = Preset::new("vrc", PresetKind::Source);
        preset.entry_mut("foot_L").set_main("Foot_L");
        let path = tmp.path().join("preset.json");
        preset.save(&path).unwrap();

        run(path.to_str().unwrap(), None, true).unwrap();

        let updated = Preset::load(&path, None).unwrap();
        assert_eq!(
            updated.entry("foot_R").unwrap().primary_main(),
            Some("Foot_R")
        );
    }
}
