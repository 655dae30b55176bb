//! Conversion configuration.
//!
//! All sections are optional in the TOML file; missing fields fall back to
//! the values the STAC corpus tooling expects.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConversionError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transcript: TranscriptConfig,
    pub dialogue: DialogueConfig,
    pub annotation: AnnotationConfig,
}

/// How transcript rows are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptConfig {
    /// Field delimiter (a single ASCII character)
    pub delimiter: char,
    /// Emitter name used by the game engine for its own announcements
    pub server_emitter: String,
    /// Character separating segments inside a turn's text
    pub segment_marker: char,
}

impl Default for TranscriptConfig {
    fn default() -> Self {
        Self {
            delimiter: '\t',
            server_emitter: "Server".to_string(),
            segment_marker: '&',
        }
    }
}

/// Substrings of Server announcements that drive dialogue detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogueConfig {
    /// A Server row containing this closes the current dialogue
    pub roll_marker: String,
    /// Resource gains collected after a roll
    pub gets_marker: String,
    /// Trades collected before a roll
    pub trade_marker: String,
}

impl Default for DialogueConfig {
    fn default() -> Self {
        Self {
            roll_marker: "rolled a".to_string(),
            gets_marker: "gets".to_string(),
            trade_marker: "traded".to_string(),
        }
    }
}

/// Provenance and optional unit layers of the emitted annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    pub author: String,
    /// Text of every Turn's `Comments` feature
    pub comments_placeholder: String,
    /// Emit a typographic `paragraph` unit for every turn
    pub paragraphs: bool,
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            author: "stac".to_string(),
            comments_placeholder: "Please write in remarks...".to_string(),
            paragraphs: true,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/csv2glozz/config.toml`.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("csv2glozz").join("config.toml"))
    }

    /// Load from an explicit path, or from the default location when it
    /// exists, or fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate a TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConversionError::io(path, e))?;
        let config = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate TOML content.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConversionError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the converter cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !self.transcript.delimiter.is_ascii() {
            return Err(ConversionError::Config(format!(
                "delimiter must be an ASCII character, got {:?}",
                self.transcript.delimiter
            )));
        }
        if self.transcript.server_emitter.is_empty() {
            return Err(ConversionError::Config(
                "server_emitter cannot be empty".to_string(),
            ));
        }
        let markers = [
            ("roll_marker", &self.dialogue.roll_marker),
            ("gets_marker", &self.dialogue.gets_marker),
            ("trade_marker", &self.dialogue.trade_marker),
        ];
        if let Some((name, _)) = markers.iter().find(|(_, marker)| marker.is_empty()) {
            return Err(ConversionError::Config(format!("{name} cannot be empty")));
        }
        Ok(())
    }
}
