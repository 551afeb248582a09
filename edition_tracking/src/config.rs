//! Run configuration
//!
//! Every field has a default derived from a resource root laid out as
//! `<res>/editions`, `<res>/cardsfolder` and `<res>/formats/Sanctioned`.
//! A JSON file may override any subset of fields.

use crate::edition::{
    EditionRules, DEFAULT_IGNORED_BORDERS, DEFAULT_IGNORED_TYPES, DEFAULT_SECTIONS,
};
use crate::error::{Result, TrackingError};
use crate::files::read_text;
use crate::formats::{DEFAULT_FORMAT_FILES, DEFAULT_TRACKED_FORMATS};
use mtg_common::DEFAULT_ORACLE_URL;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory reports are written to by default
pub const DEFAULT_OUTPUT_DIR: &str = "EditionTrackingResults";

/// Returns the default oracle cache path: ~/.cache/edition_tracking/AllCards.json
pub fn default_oracle_cache() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("edition_tracking")
        .join("AllCards.json")
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub editions_dir: PathBuf,
    pub cards_dir: PathBuf,
    pub formats_dir: PathBuf,
    pub output_dir: PathBuf,
    pub oracle_cache: PathBuf,
    pub oracle_url: String,
    /// Set types excluded from per-set tracking
    pub ignored_types: Vec<String>,
    /// Border colours excluded from per-set tracking
    pub ignored_borders: Vec<String>,
    /// Section headers whose card lines are read
    pub edition_sections: Vec<String>,
    /// Format file names to read; empty reads every file
    pub format_files: Vec<String>,
    /// Formats that get a coverage report
    pub tracked_formats: Vec<String>,
    /// List implemented cards in the distinct and format reports
    pub print_implemented: bool,
    /// Write the combined release report
    pub write_release: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self::for_res_dir(Path::new("res"))
    }
}

impl TrackingConfig {
    pub fn for_res_dir(res_dir: &Path) -> Self {
        Self {
            editions_dir: res_dir.join("editions"),
            cards_dir: res_dir.join("cardsfolder"),
            formats_dir: res_dir.join("formats").join("Sanctioned"),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            oracle_cache: default_oracle_cache(),
            oracle_url: DEFAULT_ORACLE_URL.to_string(),
            ignored_types: strings(DEFAULT_IGNORED_TYPES),
            ignored_borders: strings(DEFAULT_IGNORED_BORDERS),
            edition_sections: strings(DEFAULT_SECTIONS),
            format_files: strings(DEFAULT_FORMAT_FILES),
            tracked_formats: strings(DEFAULT_TRACKED_FORMATS),
            print_implemented: false,
            write_release: true,
        }
    }

    /// Point the three source directories at a different resource root
    pub fn with_res_dir(mut self, res_dir: &Path) -> Self {
        let defaults = Self::for_res_dir(res_dir);
        self.editions_dir = defaults.editions_dir;
        self.cards_dir = defaults.cards_dir;
        self.formats_dir = defaults.formats_dir;
        self
    }

    /// Load a JSON config file; missing fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let text = read_text(path)?;
        serde_json::from_str(&text).map_err(|source| TrackingError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn edition_rules(&self) -> EditionRules {
        EditionRules {
            ignored_types: self.ignored_types.clone(),
            ignored_borders: self.ignored_borders.clone(),
            sections: self.edition_sections.clone(),
        }
    }
}
