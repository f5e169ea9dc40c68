//! Snap command implementation
//!
//! Snaps a target rig's canonical joints onto a source rig. The source
//! side is resolved through a source preset, the target side through a
//! target preset, so the two rigs may follow different conventions.

use anyhow::{Context, Result};
use colored::Colorize;
use rigweld_core::{snap_skeleton, PresetKind, Resolver};
use std::path::Path;
use std::process::ExitCode;

use crate::document::RigDocument;

/// Run the snap command.
#[allow(clippy::too_many_arguments)]
pub fn run(
    source_rig_path: &str,
    target_rig_path: &str,
    source_path: &str,
    target_path: &str,
    mode: &str,
    output: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let source_preset = super::load_preset(source_path, Some(PresetKind::Source))?;
    let target_preset = super::load_preset(target_path, Some(PresetKind::Target))?;
    let source_doc = RigDocument::load(Path::new(source_rig_path))?;
    let mut target_doc = RigDocument::load(Path::new(target_rig_path))?;

    let source = source_doc.armature.to_armature()?;
    let mut target = target_doc.armature.to_armature()?;

    let report = match snap_skeleton(
        &mut target,
        &target_doc.armature.world,
        &source,
        &source_doc.armature.world,
        &source_preset,
        &target_preset,
        &Resolver::default(),
        super::parse_mode(mode),
    ) {
        Ok(report) => report,
        Err(e) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::json!({ "success": false, "error": e.to_string() })
                );
            } else {
                eprintln!("{} {}", "error:".red().bold(), e);
            }
            return Ok(ExitCode::from(1));
        }
    };

    target_doc.armature.update_from(&target);
    let out_path = output.unwrap_or(target_rig_path);
    target_doc
        .save(Path::new(out_path))
        .with_context(|| format!("failed to write rig document: {}", out_path))?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "success": true,
                "report": report,
                "output": out_path,
            }))?
        );
    } else {
        println!(
            "{} {} -> {}",
            "Snapping:".cyan().bold(),
            target_rig_path,
            source_rig_path
        );
        println!(
            "{} {} aligned, {} skipped",
            "Joints:".dimmed(),
            report.aligned,
            report.skipped
        );
        println!("\n{} Written to {}", "SUCCESS".green().bold(), out_path);
    }

    Ok(ExitCode::SUCCESS)
}
