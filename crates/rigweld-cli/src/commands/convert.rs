//! Convert command implementation
//!
//! Applies compiled source-to-target rules to the weight channels of every
//! mesh in a rig document, without standardizing in between.

use anyhow::{Context, Result};
use colored::Colorize;
use rigweld_core::{convert_meshes, PresetKind};
use std::path::Path;
use std::process::ExitCode;

use crate::document::RigDocument;

/// Run the convert command.
pub fn run(
    source_path: &str,
    target_path: &str,
    rig_path: &str,
    output: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    let source = super::load_preset(source_path, Some(PresetKind::Source))?;
    let target = super::load_preset(target_path, Some(PresetKind::Target))?;
    let mut doc = RigDocument::load(Path::new(rig_path))?;

    let report = match convert_meshes(&mut doc.meshes, &source, &target) {
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

    let out_path = output.unwrap_or(rig_path);
    doc.save(Path::new(out_path))
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
        println!("{} {}", "Converting:".cyan().bold(), rig_path);
        println!("{} {}", "Rules:".dimmed(), report.rules);
        println!("{} {}", "Meshes updated:".dimmed(), report.meshes_updated);
        println!(
            "{} {} merged, {} renamed",
            "Channels:".dimmed(),
            report.merged,
            report.renamed
        );
        println!("\n{} Written to {}", "SUCCESS".green().bold(), out_path);
    }

    Ok(ExitCode::SUCCESS)
}
