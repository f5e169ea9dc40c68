//! RigWeld CLI - skeleton retargeting over JSON rig documents
//!
//! This binary provides commands for validating and mirroring mapping
//! presets, compiling conversion rules, and converting, renaming, snapping
//! and aligning rigs.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use rigweld_cli::commands;

/// RigWeld - Skeletal Rig Retargeting
#[derive(Parser)]
#[command(name = "rigweld")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a mapping preset file
    Validate {
        /// Path to the preset file (JSON)
        #[arg(short, long)]
        preset: String,

        /// Expected preset kind (source = X_PRESET, target = Y_PRESET)
        #[arg(long, value_parser = ["source", "target"])]
        kind: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Mirror the left half of a preset onto its right half
    Mirror {
        /// Path to the preset file (JSON)
        #[arg(short, long)]
        preset: String,

        /// Output file path (default: overwrite input file)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Compile and print conversion rules for a preset pair
    Compile {
        /// Path to the source (X) preset file
        #[arg(short, long)]
        source: String,

        /// Path to the target (Y) preset file
        #[arg(short, long)]
        target: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Convert a rig document's weight channels between conventions
    Convert {
        /// Path to the source (X) preset file
        #[arg(short, long)]
        source: String,

        /// Path to the target (Y) preset file
        #[arg(short, long)]
        target: String,

        /// Path to the rig document (JSON)
        #[arg(short, long)]
        rig: String,

        /// Output file path (default: overwrite the rig document)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Standardize a rig's bone names, optionally on to a target convention
    Rename {
        /// Path to the source (X) preset file
        #[arg(short, long)]
        source: String,

        /// Path to the target (Y) preset file (skip to stop at canonical names)
        #[arg(short, long)]
        target: Option<String>,

        /// Path to the rig document (JSON)
        #[arg(short, long)]
        rig: String,

        /// Output file path (default: overwrite the rig document)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Snap a target rig's canonical joints onto a source rig
    Snap {
        /// Path to the source rig document (JSON)
        #[arg(long)]
        source_rig: String,

        /// Path to the target rig document (JSON)
        #[arg(long)]
        target_rig: String,

        /// Path to the source (X) preset file
        #[arg(short, long)]
        source: String,

        /// Path to the target (Y) preset file
        #[arg(short, long)]
        target: String,

        /// Joint transfer mode (position keeps target bone shapes)
        #[arg(long, default_value = "position", value_parser = ["position", "pose"])]
        mode: String,

        /// Output file path (default: overwrite the target rig document)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Align same-named bones of a target rig to a source rig
    Align {
        /// Path to the source rig document (JSON)
        #[arg(long)]
        source_rig: String,

        /// Path to the target rig document (JSON)
        #[arg(long)]
        target_rig: String,

        /// Joint transfer mode (position keeps target bone shapes)
        #[arg(long, default_value = "position", value_parser = ["position", "pose"])]
        mode: String,

        /// Output file path (default: overwrite the target rig document)
        #[arg(short, long)]
        output: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { preset, kind, json } => {
            commands::validate::run(&preset, kind.as_deref(), json)
        }
        Commands::Mirror {
            preset,
            output,
            json,
        } => commands::mirror::run(&preset, output.as_deref(), json),
        Commands::Compile {
            source,
            target,
            json,
        } => commands::compile::run(&source, &target, json),
        Commands::Convert {
            source,
            target,
            rig,
            output,
            json,
        } => commands::convert::run(&source, &target, &rig, output.as_deref(), json),
        Commands::Rename {
            source,
            target,
            rig,
            output,
            json,
        } => commands::rename::run(&source, target.as_deref(), &rig, output.as_deref(), json),
        Commands::Snap {
            source_rig,
            target_rig,
            source,
            target,
            mode,
            output,
            json,
        } => commands::snap::run(
            &source_rig,
            &target_rig,
            &source,
            &target,
            &mode,
            output.as_deref(),
            json,
        ),
        Commands::Align {
            source_rig,
            target_rig,
            mode,
            output,
            json,
        } => commands::align::run(
            &source_rig,
            &target_rig,
            &mode,
            output.as_deref(),
            json,
        ),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
