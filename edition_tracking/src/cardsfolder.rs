//! Implemented-card definitions
//!
//! One file per card, made of `Key:value` lines. Only the display name is
//! needed: the first `Name:` line, or every `Name:` line joined with ` // `
//! once an `AlternateMode` line mentioning `Split` has been seen.

use crate::error::Result;
use crate::files::{read_text, text_files};
use std::collections::HashSet;
use std::path::Path;

/// Separator between the faces of a split card
pub const FACE_SEPARATOR: &str = " // ";

/// Lowercase display name of a card definition, if it has one
pub fn parse_card_name(text: &str) -> Option<String> {
    let mut faces: Vec<&str> = Vec::new();
    let mut split = false;

    for line in text.lines() {
        if let Some(name) = line.strip_prefix("Name:") {
            if split || faces.is_empty() {
                faces.push(name.trim());
            }
        } else if line.starts_with("AlternateMode") && line.contains("Split") {
            split = true;
        }
    }

    if faces.is_empty() {
        None
    } else {
        Some(faces.join(FACE_SEPARATOR).to_lowercase())
    }
}

/// Names of every implemented card, for case-insensitive presence tests
#[derive(Debug, Default, Clone)]
pub struct ImplementedCards {
    names: Vec<String>,
    lookup: HashSet<String>,
}

impl ImplementedCards {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.into().to_lowercase())
            .collect();
        let lookup = names.iter().cloned().collect();
        Self { names, lookup }
    }

    /// Parse every card definition below `dir`; unreadable files are skipped
    pub fn load_dir(dir: &Path) -> Result<Self> {
        log::info!("Parsing implemented cards: {}", dir.display());
        let mut names = Vec::new();

        for path in text_files(dir)? {
            let text = match read_text(&path) {
                Ok(text) => text,
                Err(e) => {
                    log::warn!("Skipping card file: {}", e);
                    continue;
                }
            };
            match parse_card_name(&text) {
                Some(name) => names.push(name),
                None => log::debug!("No Name: line in {}", path.display()),
            }
        }

        let cards = Self::from_names(names);
        log::info!(
            "Found {} implemented cards ({} distinct)",
            cards.len(),
            cards.distinct_len()
        );
        Ok(cards)
    }

    /// Whether a card name is implemented, ignoring case
    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(&name.to_lowercase())
    }

    /// Every parsed name, one per definition file
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn distinct_len(&self) -> usize {
        self.lookup.len()
    }
}
