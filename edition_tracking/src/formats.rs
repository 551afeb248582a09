//! Competitive format definitions
//!
//! A format file holds one or more records separated by a single blank line:
//!
//! ```text
//! [format]
//! Name:Standard
//! Type:Sanctioned
//! Sets:ABC, DEF
//! Banned:Foo; Bar
//! ```
//!
//! A record must open with `Name:` (optionally preceded by `[format]`).
//! Anything else at a record start, or a second blank line, ends the file.

use crate::error::Result;
use crate::files::{read_text, text_files};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Format file names read when nothing else is configured
pub const DEFAULT_FORMAT_FILES: &[&str] = &["Standard.txt", "Modern.txt"];

/// Formats that get their own coverage report by default
pub const DEFAULT_TRACKED_FORMATS: &[&str] = &["Standard", "Modern"];

/// One competitive format
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Format {
    pub name: String,
    pub format_type: Option<String>,
    pub sets: Vec<String>,
    pub banned: Vec<String>,
    pub restricted: Vec<String>,
}

/// Why parsing of a format file stopped early
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("line {line_number}: expected a Name: line, found {line:?}")]
    UnexpectedLine { line_number: usize, line: String },
    #[error("line {line_number}: format has an empty name")]
    EmptyName { line_number: usize },
}

/// Records read from one file, plus the reason parsing stopped if it did
/// not reach the end cleanly
#[derive(Debug, Default)]
pub struct ParsedFormats {
    pub formats: Vec<Format>,
    pub stopped: Option<FormatError>,
}

fn split_list(value: &str, separator: &str) -> Vec<String> {
    value
        .trim()
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Value after the first `:` of a `Key:value` line
fn field_value(line: &str) -> &str {
    line.split_once(':').map(|(_, v)| v).unwrap_or("")
}

/// Parse the records of one format file
pub fn parse_formats(text: &str) -> ParsedFormats {
    let mut parsed = ParsedFormats::default();
    let mut lines = text.lines().map(str::trim).enumerate();

    while let Some((index, line)) = lines.next() {
        if line.is_empty() {
            break;
        }

        let (index, line) = if line == "[format]" {
            match lines.next() {
                Some(next) => next,
                None => break,
            }
        } else {
            (index, line)
        };
        let line_number = index + 1;

        let Some(name) = line.strip_prefix("Name:").map(str::trim) else {
            parsed.stopped = Some(FormatError::UnexpectedLine {
                line_number,
                line: line.to_string(),
            });
            break;
        };
        if name.is_empty() {
            parsed.stopped = Some(FormatError::EmptyName { line_number });
            break;
        }

        let mut format = Format {
            name: name.to_string(),
            ..Format::default()
        };
        for (_, line) in lines.by_ref() {
            if line.is_empty() {
                break;
            }
            if line.starts_with("Sets:") {
                format.sets = split_list(field_value(line), ", ");
            } else if line.starts_with("Banned") {
                format.banned = split_list(field_value(line), "; ");
            } else if line.starts_with("Restricted") {
                format.restricted = split_list(field_value(line), "; ");
            } else if line.starts_with("Type:") {
                format.format_type = Some(field_value(line).trim().to_string());
            }
        }
        parsed.formats.push(format);
    }

    parsed
}

/// Formats by name
#[derive(Debug, Default, Clone)]
pub struct Formats {
    formats: BTreeMap<String, Format>,
}

impl Formats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse format files below `dir`. With a non-empty `allowed` list only
    /// files whose name appears in it are read.
    pub fn load_dir(dir: &Path, allowed: &[String]) -> Result<Self> {
        log::info!("Looking for formats in {}", dir.display());
        let mut formats = Self::new();

        for path in text_files(dir)? {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            if !allowed.is_empty() && !allowed.contains(&file_name) {
                continue;
            }

            match read_text(&path) {
                Ok(text) => formats.add_file(&text, &file_name),
                Err(e) => log::warn!("Skipping format file: {}", e),
            }
        }

        log::info!("Loaded {} formats", formats.len());
        Ok(formats)
    }

    /// Parse one file's contents, keeping whatever records came before a
    /// malformed one
    pub fn add_file(&mut self, text: &str, source: &str) {
        let parsed = parse_formats(text);
        if let Some(reason) = &parsed.stopped {
            log::debug!("Stopped parsing format file {}: {}", source, reason);
        }
        for format in parsed.formats {
            self.insert(format);
        }
    }

    pub fn insert(&mut self, format: Format) {
        self.formats.insert(format.name.clone(), format);
    }

    pub fn get(&self, name: &str) -> Option<&Format> {
        self.formats.get(name)
    }

    /// Legal set codes of a format; empty for unknown formats
    pub fn legal_sets(&self, name: &str) -> &[String] {
        self.get(name).map(|f| f.sets.as_slice()).unwrap_or(&[])
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.formats.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}
