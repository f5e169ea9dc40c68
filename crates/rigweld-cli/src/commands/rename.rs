//! Rename command implementation
//!
//! Standardizes a rig document's skeleton through a source preset (merge
//! aux weight, rename mains to canonical keys, delete aux bones) and, when
//! a target preset is supplied, renames the canonical bones on to the
//! target convention in the same pass.

use anyhow::{Context, Result};
use colored::Colorize;
use rigweld_core::{apply_target_names, standardize, PresetKind, Resolver};
use std::path::Path;
use std::process::ExitCode;

use crate::document::RigDocument;

/// Run the rename command.
pub fn run(
    source_path: &str,
    target_path: Option<&str>,
    rig_path: &str,
    output: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let source = super::load_preset(source_path, Some(PresetKind::Source))?;
    let target = target_path
        .map(|path| super::load_preset(path, Some(PresetKind::Target)))
        .transpose()?;
    let mut doc = RigDocument::load(Path::new(rig_path))?;
    let mut armature = doc.armature.to_armature()?;

    let report = match standardize(&mut armature, &mut doc.meshes, &source, &Resolver::default()) {
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

    let retargeted = target
        .as_ref()
        .map(|preset| apply_target_names(&mut armature, preset).renamed);

    doc.armature.update_from(&armature);
    let out_path = output.unwrap_or(rig_path);
    doc.save(Path::new(out_path))
        .with_context(|| format!("failed to write rig document: {}", out_path))?;

    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "success": true,
                "standardized": report,
                "retargeted": retargeted,
                "output": out_path,
            }))?
        );
    } else {
        println!("{} {}", "Renaming:".cyan().bold(), rig_path);
        println!(
            "{} {} renamed, {} deleted, {} channels merged",
            "Standardized:".dimmed(),
            report.renamed,
            report.deleted,
            report.merged
        );
        if let Some(count) = retargeted {
            println!("{} {} renamed", "Retargeted:".dimmed(), count);
        }
        println!("\n{} Written to {}", "SUCCESS".green().bold(), out_path);
    }

    Ok(ExitCode::SUCCESS)
}
