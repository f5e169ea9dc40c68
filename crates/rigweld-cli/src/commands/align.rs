//! Align command implementation
//!
//! Aligns every same-named bone of a target rig to a source rig, rigidly
//! dragging descendants. No presets involved; only exact name matches.

use anyhow::{Context, Result};
use colored::Colorize;
use rigweld_core::align_skeleton_by_name;
use std::path::Path;
use std::process::ExitCode;

use crate::document::RigDocument;

/// Run the align command.
pub fn run(
    source_rig_path: &str,
    target_rig_path: &str,
    mode: &str,
    output: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let source_doc = RigDocument::load(Path::new(source_rig_path))?;
    let mut target_doc = RigDocument::load(Path::new(target_rig_path))?;

    let source = source_doc.armature.to_armature()?;
    let mut target = target_doc.armature.to_armature()?;

    let aligned = match align_skeleton_by_name(
        &mut target,
        &target_doc.armature.world,
        &source,
        &source_doc.armature.world,
        super::parse_mode(mode),
    ) {
        Ok(aligned) => aligned,
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
                "aligned": aligned,
                "output": out_path,
            }))?
        );
    } else {
        println!(
            "{} {} -> {}",
            "Aligning:".cyan().bold(),
            target_rig_path,
            source_rig_path
        );
        println!("{} {}", "Bones aligned:".dimmed(), aligned);
        println!("\n{} Written to {}", "SUCCESS".green().bold(), out_path);
    }

    Ok(ExitCode::SUCCESS)
}
