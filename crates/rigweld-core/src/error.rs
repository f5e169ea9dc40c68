//! Error types for preset loading and batch operations.
//!
//! Per-key misses inside a batch (a canonical key with no matching bone or
//! channel) are never errors; they are skipped and tallied into the
//! operation's report. Only whole-operation preconditions surface here.

use thiserror::Error;

use crate::preset::PresetKind;

/// Errors raised while loading or validating a mapping preset.
#[derive(Debug, Error)]
pub enum PresetError {
    /// I/O error while reading or writing a preset file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed exchange-format content.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The preset's `type` tag does not match what the caller asked for.
    #[error("preset '{name}' is tagged {found}, expected {expected}")]
    KindMismatch {
        name: String,
        expected: PresetKind,
        found: PresetKind,
    },
}

/// Errors raised by the host-facing operations before any mutation begins.
#[derive(Debug, Error)]
pub enum OpError {
    /// A preset failed to load or validate.
    #[error(transparent)]
    Preset(#[from] PresetError),

    /// The caller supplied the wrong inputs (selection shape).
    #[error("invalid selection: {0}")]
    Selection(String),

    /// The source and target presets share no usable bone mappings.
    #[error("source and target presets share no bone mappings")]
    NoSharedMappings,

    /// The target skeleton's world transform cannot be inverted.
    #[error("target world transform is not invertible")]
    NonInvertibleTransform,
}
