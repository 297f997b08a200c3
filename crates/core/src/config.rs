//! Configuration for drill sessions.
//!
//! This module defines the settings a drill session runs with. It provides:
//! 1. **Defaults:** All six formats, entropy seeding, screen clearing, and visible givens.
//! 2. **Structure:** A flat `DrillConfig` deserialized from JSON with every field optional.
//! 3. **Resolution:** Conversion of the configured format letters into an instruction pool.
//!
//! Configuration is supplied as a JSON file to the CLI, or use `DrillConfig::default()`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::isa::format::Format;
use crate::isa::registry::{InstructionDescriptor, InstructionRegistry};

/// Default configuration values.
mod defaults {
    use crate::isa::format::Format;

    /// Every format is drilled unless narrowed.
    pub fn formats() -> Vec<String> {
        Format::ALL.iter().map(ToString::to_string).collect()
    }

    /// Clear the terminal between questions.
    pub const CLEAR_SCREEN: bool = true;

    /// Show opcode/funct values during the binary and hex steps.
    pub const SHOW_GIVENS: bool = true;
}

/// Drill session settings.
///
/// # Example
///
/// ```
/// use rvtutor_core::config::DrillConfig;
///
/// let json = r#"{ "formats": ["r", "B"], "seed": 7 }"#;
/// let config = DrillConfig::from_json(json).unwrap();
/// assert_eq!(config.seed, Some(7));
/// assert!(config.clear_screen);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DrillConfig {
    /// Format letters to drill (case-insensitive).
    #[serde(default = "defaults::formats")]
    pub formats: Vec<String>,

    /// Fixed PRNG seed for reproducible sessions; entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Clear the terminal before each question.
    #[serde(default = "DrillConfig::default_clear_screen")]
    pub clear_screen: bool,

    /// Reveal opcode and funct values during the binary and hex steps.
    #[serde(default = "DrillConfig::default_show_givens")]
    pub show_givens: bool,
}

impl DrillConfig {
    const fn default_clear_screen() -> bool {
        defaults::CLEAR_SCREEN
    }

    const fn default_show_givens() -> bool {
        defaults::SHOW_GIVENS
    }

    /// Parses a configuration from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Load`] if the file cannot be read, or
    /// [`ConfigError::Parse`] if it is not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parsed formats, skipping entries that are not format letters.
    pub fn parsed_formats(&self) -> Vec<Format> {
        self.formats
            .iter()
            .filter_map(|f| Format::from_letter(f))
            .collect()
    }

    /// Filters `registry` down to the configured formats.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptySelection`] if no instruction matches.
    pub fn pool(
        &self,
        registry: &InstructionRegistry,
    ) -> Result<Vec<InstructionDescriptor>, ConfigError> {
        registry.filter(&self.formats)
    }
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            formats: defaults::formats(),
            seed: None,
            clear_screen: defaults::CLEAR_SCREEN,
            show_givens: defaults::SHOW_GIVENS,
        }
    }
}
