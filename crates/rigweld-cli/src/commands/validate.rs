//! Validate command implementation
//!
//! Checks a preset file against the exchange format and the standard
//! taxonomy.

use anyhow::Result;
use colored::Colorize;
use rigweld_core::{taxonomy, Preset};
use serde::Serialize;
use std::process::ExitCode;

use super::parse_kind;

/// Machine-readable output for the validate command.
#[derive(Debug, Serialize)]
struct ValidateOutput {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    mappings: usize,
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the validate command.
///
/// Exit code: 0 if the preset parses (and matches `--kind` when given),
/// 1 otherwise. Unknown keys and empty entries are warnings, not errors.
pub fn run(preset_path: &str, kind: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let expected = kind.map(parse_kind);

    let preset = match super::load_preset(preset_path, expected) {
        Ok(preset) => preset,
        Err(e) => {
            if json_output {
                let output = ValidateOutput {
                    success: false,
                    name: None,
                    kind: None,
                    version: None,
                    mappings: 0,
                    warnings: vec![],
                    error: Some(format!("{:#}", e)),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                eprintln!("{} {:#}", "error:".red().bold(), e);
            }
            return Ok(ExitCode::from(1));
        }
    };

    let warnings = collect_warnings(&preset);

    if json_output {
        let output = ValidateOutput {
            success: true,
            name: Some(preset.info.name.clone()),
            kind: Some(preset.info.kind.to_string()),
            version: Some(preset.info.version.clone()),
            mappings: preset.mappings.len(),
            warnings,
            error: None,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", "Validating:".cyan().bold(), preset_path);
        println!(
            "{} {} ({}, v{})",
            "Preset:".dimmed(),
            preset.info.name,
            preset.info.kind,
            preset.info.version
        );
        println!("{} {}", "Mappings:".dimmed(), preset.mappings.len());
        for warning in &warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
        println!("\n{} Preset is valid", "SUCCESS".green().bold());
    }

    Ok(ExitCode::SUCCESS)
}

/// Flags mapping keys outside the standard taxonomy and entries that carry
/// no names.
fn collect_warnings(preset: &Preset) -> Vec<String> {
    let mut warnings = Vec::new();
    for (key, entry) in &preset.mappings {
        if !taxonomy::is_standard(key) {
            warnings.push(format!("unknown canonical key: {}", key));
        }
        if entry.is_empty() {
            warnings.push(format!("empty mapping entry: {}", key));
        }
    }
    warnings
}
