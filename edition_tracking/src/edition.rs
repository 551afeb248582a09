//! Edition definition parsing
//!
//! An edition file starts with a `Key=Value` metadata block (`Code=`, `Name=`,
//! `Type=`, `Border=`) followed by card sections such as `[cards]`. Any
//! bracketed line that is not a tracked section header returns the parser to
//! metadata, so variant printings that follow are read as a fresh block.

use crate::error::Result;
use crate::files::{read_text, text_files};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Set types left out of per-set tracking by default
pub const DEFAULT_IGNORED_TYPES: &[&str] = &[
    "From_the_Vault",
    "Duel_Decks",
    "Online",
    "Premium_Deck_Series",
    "Funny",
    "Promos",
];

/// Border colours left out of per-set tracking by default
pub const DEFAULT_IGNORED_BORDERS: &[&str] = &["Silver"];

/// Section headers whose card lines are tracked
pub const DEFAULT_SECTIONS: &[&str] = &[
    "[cards]",
    "[precon product]",
    "[borderless]",
    "[showcase]",
    "[extended art]",
    "[buy a box]",
    "[promo]",
    "[jumpstart]",
    "[rebalanced]",
];

/// Single-letter rarity codes that may follow a collector number
const RARITY_CODES: &[&str] = &["C", "U", "R", "M", "S", "L", "T", "P"];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Which sets are ignored and which section headers are read
#[derive(Debug, Clone)]
pub struct EditionRules {
    pub ignored_types: Vec<String>,
    pub ignored_borders: Vec<String>,
    pub sections: Vec<String>,
}

impl Default for EditionRules {
    fn default() -> Self {
        Self {
            ignored_types: to_strings(DEFAULT_IGNORED_TYPES),
            ignored_borders: to_strings(DEFAULT_IGNORED_BORDERS),
            sections: to_strings(DEFAULT_SECTIONS),
        }
    }
}

impl EditionRules {
    fn is_section(&self, line: &str) -> bool {
        self.sections.iter().any(|s| s == line)
    }

    fn is_ignored(&self, set_type: Option<&str>, border: Option<&str>) -> bool {
        set_type.is_some_and(|t| self.ignored_types.iter().any(|i| i == t))
            || border.is_some_and(|b| self.ignored_borders.iter().any(|i| i == b))
    }
}

/// Registered metadata of one set
#[derive(Debug, Clone, PartialEq)]
pub struct SetInfo {
    pub code: String,
    pub name: String,
    pub set_type: Option<String>,
    pub border: Option<String>,
    pub ignored: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ReadingMetadata,
    ReadingSection,
}

/// Metadata seen so far in the current file. Values persist across blocks;
/// a later block only overrides the keys it repeats.
#[derive(Debug, Default)]
struct Metadata {
    code: Option<String>,
    name: Option<String>,
    set_type: Option<String>,
    border: Option<String>,
}

fn metadata_value(line: &str, key: &str) -> Option<String> {
    line.strip_prefix(key).map(|value| value.trim().to_string())
}

/// Set metadata and set membership of every card across all edition files
#[derive(Debug, Default)]
pub struct EditionIndex {
    sets: Vec<SetInfo>,
    positions: HashMap<String, usize>,
    cards: BTreeMap<String, Vec<String>>,
}

impl EditionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every edition file below `dir`.
    ///
    /// A file that cannot be read is logged and skipped.
    pub fn load_dir(dir: &Path, rules: &EditionRules) -> Result<Self> {
        log::info!("Parsing Editions folder: {}", dir.display());
        let mut index = Self::new();

        for path in text_files(dir)? {
            match read_text(&path) {
                Ok(text) => index.parse_edition(&text, rules),
                Err(e) => log::warn!("Skipping edition file: {}", e),
            }
        }

        log::info!("Total Cards Found in all editions: {}", index.cards.len());
        log::info!(
            "These sets will be ignored in some output files: {:?}",
            index.ignored_codes()
        );
        Ok(index)
    }

    /// Parse one edition file's contents into the index
    pub fn parse_edition(&mut self, text: &str, rules: &EditionRules) {
        let mut state = ParseState::ReadingMetadata;
        let mut meta = Metadata::default();

        for raw in text.lines() {
            let line = raw.trim();
            match state {
                ParseState::ReadingMetadata => {
                    if rules.is_section(line) {
                        self.register(&meta, rules);
                        state = ParseState::ReadingSection;
                    } else if let Some(code) = metadata_value(line, "Code=") {
                        meta.code = Some(code);
                    } else if let Some(name) = metadata_value(line, "Name=") {
                        meta.name = Some(name);
                    } else if let Some(set_type) = metadata_value(line, "Type=") {
                        meta.set_type = Some(set_type);
                    } else if let Some(border) = metadata_value(line, "Border=") {
                        meta.border = Some(border);
                    }
                }
                ParseState::ReadingSection => {
                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }
                    if line.starts_with('[') {
                        if !rules.is_section(line) {
                            state = ParseState::ReadingMetadata;
                        }
                        continue;
                    }
                    let Some(code) = meta.code.as_deref() else {
                        log::debug!("Card line before any Code= metadata: {}", line);
                        continue;
                    };
                    if let Some(card) = parse_card_line(line) {
                        self.cards.entry(card).or_default().push(code.to_string());
                    }
                }
            }
        }
    }

    /// Commit metadata on entering a section, once per set code
    fn register(&mut self, meta: &Metadata, rules: &EditionRules) {
        let Some(code) = meta.code.as_deref() else {
            return;
        };
        if code.is_empty() || self.positions.contains_key(code) {
            return;
        }

        let ignored = rules.is_ignored(meta.set_type.as_deref(), meta.border.as_deref());
        self.positions.insert(code.to_string(), self.sets.len());
        self.sets.push(SetInfo {
            code: code.to_string(),
            name: meta.name.clone().unwrap_or_default(),
            set_type: meta.set_type.clone(),
            border: meta.border.clone(),
            ignored,
        });
    }

    /// Registered sets in the order they were first seen
    pub fn sets(&self) -> &[SetInfo] {
        &self.sets
    }

    pub fn set_codes(&self) -> impl Iterator<Item = &str> {
        self.sets.iter().map(|s| s.code.as_str())
    }

    pub fn set(&self, code: &str) -> Option<&SetInfo> {
        self.positions.get(code).map(|&i| &self.sets[i])
    }

    pub fn set_name(&self, code: &str) -> Option<&str> {
        self.set(code).map(|s| s.name.as_str())
    }

    pub fn is_ignored(&self, code: &str) -> bool {
        self.set(code).is_some_and(|s| s.ignored)
    }

    pub fn ignored_codes(&self) -> Vec<&str> {
        self.sets
            .iter()
            .filter(|s| s.ignored)
            .map(|s| s.code.as_str())
            .collect()
    }

    /// Card name to every set code it was listed under, repeats included
    pub fn cards(&self) -> &BTreeMap<String, Vec<String>> {
        &self.cards
    }

    pub fn card_sets(&self, name: &str) -> Option<&[String]> {
        self.cards.get(name).map(|v| v.as_slice())
    }
}

/// Extract the card name from a section line.
///
/// Lines starting with a digit carry a collector number (and optionally a
/// one-letter rarity) before the name. Anything after `|` or ` @` is printing
/// detail, and a trailing `+` marks a foil.
pub fn parse_card_line(line: &str) -> Option<String> {
    let line = line.trim();
    let field = if line.starts_with(|c: char| c.is_ascii_digit()) {
        strip_collector_number(line)
    } else {
        line
    };

    let name = field.split('|').next().unwrap_or(field);
    let name = name.split(" @").next().unwrap_or(name).trim();
    let name = name.strip_suffix('+').unwrap_or(name).trim_end();

    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn strip_collector_number(line: &str) -> &str {
    let rest = match line.split_once(char::is_whitespace) {
        Some((_, rest)) => rest.trim_start(),
        None => return "",
    };
    match rest.split_once(char::is_whitespace) {
        Some((token, after)) if RARITY_CODES.contains(&token) => after.trim_start(),
        _ => rest,
    }
}

#[cfg(test)]
#[path = "edition_tests.rs"]
mod tests;
