//! CLI command implementations

pub mod align;
pub mod compile;
pub mod convert;
pub mod mirror;
pub mod rename;
pub mod snap;
pub mod validate;

use anyhow::{Context, Result};
use rigweld_core::{Preset, PresetKind, SnapMode};
use std::path::Path;

/// Loads a preset file, enforcing its kind tag when one is expected.
fn load_preset(path: &str, expected: Option<PresetKind>) -> Result<Preset> {
    Preset::load(Path::new(path), expected)
        .with_context(|| format!("failed to load preset: {}", path))
}

/// Parses the `--kind` argument. Values are validated by clap.
fn parse_kind(kind: &str) -> PresetKind {
    match kind {
        "source" => PresetKind::Source,
        _ => PresetKind::Target,
    }
}

/// Parses the `--mode` argument. Values are validated by clap.
fn parse_mode(mode: &str) -> SnapMode {
    match mode {
        "pose" => SnapMode::PoseMatch,
        _ => SnapMode::PositionOnly,
    }
}
