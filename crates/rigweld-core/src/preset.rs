//! Mapping presets and their JSON exchange format.
//!
//! A preset records, for one naming convention, which concrete bone names
//! carry each canonical key: an ordered list of `main` candidates (different
//! rigs of the same family name the "same" bone differently) and a list of
//! `aux` duplicates whose weight is folded into the main bone and discarded.
//!
//! The on-disk shape is:
//!
//! ```json
//! {
//!   "preset_info": { "name": "...", "type": "X_PRESET", "version": "2.0", "description": "..." },
//!   "mappings": {
//!     "pelvis": { "main": ["Hips"], "aux": ["Hips_dup"] }
//!   }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::PresetError;

/// Which side of a conversion a preset describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PresetKind {
    /// The convention a rig is imported from.
    #[serde(rename = "X_PRESET")]
    Source,
    /// The convention a rig is exported to.
    #[serde(rename = "Y_PRESET")]
    Target,
}

impl PresetKind {
    /// Returns the wire tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetKind::Source => "X_PRESET",
            PresetKind::Target => "Y_PRESET",
        }
    }
}

impl std::fmt::Display for PresetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Preset metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetInfo {
    /// Display name of the preset.
    pub name: String,
    /// Whether this is a source (X) or target (Y) preset.
    #[serde(rename = "type")]
    pub kind: PresetKind,
    /// Format version string.
    pub version: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Per-canonical-key mapping: main candidates and auxiliary duplicates.
///
/// Invariant: a name never appears in both `main` and `aux` of the same
/// entry. The mutation methods filter the self-merge case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    /// Ordered candidate names for the main bone. Resolution stops at the
    /// first candidate that matches a real bone.
    #[serde(default)]
    pub main: Vec<String>,
    /// Names of redundant/helper bones whose weight folds into the main.
    #[serde(default)]
    pub aux: Vec<String>,
}

impl MappingEntry {
    /// Replaces the main candidate list with a single name, removing that
    /// name from `aux` so a bone never merges into itself.
    pub fn set_main(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.aux.retain(|a| *a != name);
        self.main = vec![name];
    }

    /// Appends an auxiliary name. Returns false (and leaves the entry
    /// untouched) if the name is already present or is a main candidate.
    pub fn add_aux(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.main.contains(&name) || self.aux.contains(&name) {
            return false;
        }
        self.aux.push(name);
        true
    }

    /// The authoritative main name, if any.
    pub fn primary_main(&self) -> Option<&str> {
        self.main.first().map(String::as_str)
    }

    /// True when the entry carries no names at all.
    pub fn is_empty(&self) -> bool {
        self.main.is_empty() && self.aux.is_empty()
    }
}

/// A loaded mapping preset: metadata plus canonical-key mappings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Preset metadata.
    #[serde(rename = "preset_info")]
    pub info: PresetInfo,
    /// Canonical key to mapping entry.
    pub mappings: BTreeMap<String, MappingEntry>,
}

impl Preset {
    /// Creates an empty preset.
    pub fn new(name: impl Into<String>, kind: PresetKind) -> Self {
        Self {
            info: PresetInfo {
                name: name.into(),
                kind,
                version: "2.0".to_string(),
                description: String::new(),
            },
            mappings: BTreeMap::new(),
        }
    }

    /// Looks up the mapping entry for a canonical key.
    pub fn entry(&self, key: &str) -> Option<&MappingEntry> {
        self.mappings.get(key)
    }

    /// Returns the mapping entry for a canonical key, creating it if absent.
    pub fn entry_mut(&mut self, key: &str) -> &mut MappingEntry {
        self.mappings.entry(key.to_string()).or_default()
    }

    /// Parses a preset from exchange-format JSON.
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the preset to pretty-printed exchange-format JSON.
    pub fn to_json_pretty(&self) -> Result<String, PresetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the preset's kind tag against what the caller expects.
    pub fn ensure_kind(&self, expected: PresetKind) -> Result<(), PresetError> {
        if self.info.kind != expected {
            return Err(PresetError::KindMismatch {
                name: self.info.name.clone(),
                expected,
                found: self.info.kind,
            });
        }
        Ok(())
    }

    /// Loads a preset file, optionally validating its kind tag.
    pub fn load(path: &Path, expected: Option<PresetKind>) -> Result<Self, PresetError> {
        let json = std::fs::read_to_string(path)?;
        let preset = Self::from_json(&json)?;
        if let Some(expected) = expected {
            preset.ensure_kind(expected)?;
        }
        Ok(preset)
    }

    /// Writes the preset to a file in exchange format.
    pub fn save(&self, path: &Path) -> Result<(), PresetError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}
