//! Reconciliation of edition listings against implemented cards
//!
//! Every tracked set is split into implemented and missing card names.
//! Results are also unioned across all sets (the distinct view) and across
//! the sets legal in each tracked format.

use crate::cardsfolder::ImplementedCards;
use crate::edition::EditionIndex;
use crate::formats::Formats;
use std::collections::{BTreeSet, HashMap};

/// Implemented/missing split of a group of card names
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    pub implemented: BTreeSet<String>,
    pub missing: BTreeSet<String>,
}

impl Coverage {
    /// File a card under implemented or missing. Empty names are dropped.
    pub fn classify(&mut self, name: &str, implemented: &ImplementedCards) {
        if implemented.contains(name) {
            self.implemented.insert(name.to_string());
        } else if !name.is_empty() {
            self.missing.insert(name.to_string());
        }
    }

    pub fn merge(&mut self, other: &Coverage) {
        self.implemented.extend(other.implemented.iter().cloned());
        self.missing.extend(other.missing.iter().cloned());
    }

    pub fn implemented_count(&self) -> usize {
        self.implemented.len()
    }

    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    pub fn total(&self) -> usize {
        self.implemented_count() + self.missing_count()
    }

    /// Share of implemented cards in percent; 0 when there are no cards
    pub fn percentage(&self) -> f64 {
        percentage(self.implemented_count(), self.total())
    }
}

fn percentage(implemented: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        implemented as f64 / total as f64 * 100.0
    }
}

/// Coverage of one set
#[derive(Debug, Clone)]
pub struct SetCoverage {
    pub code: String,
    pub name: String,
    pub coverage: Coverage,
}

impl SetCoverage {
    /// A registered set without a single listed card
    pub fn is_unmapped(&self) -> bool {
        self.coverage.total() == 0
    }
}

/// Coverage of one format, over the union of its legal sets
#[derive(Debug, Clone)]
pub struct FormatCoverage {
    pub name: String,
    pub sets: Vec<String>,
    pub coverage: Coverage,
}

/// Summed counts over every set with at least one card
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub implemented: usize,
    pub missing: usize,
    pub total: usize,
}

impl Totals {
    pub fn percentage(&self) -> Option<f64> {
        (self.total > 0).then(|| percentage(self.implemented, self.total))
    }
}

/// Output of a reconciliation run
#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Tracked sets in edition order
    pub sets: Vec<SetCoverage>,
    pub distinct: Coverage,
    pub formats: Vec<FormatCoverage>,
}

impl Reconciliation {
    /// Sets ordered by implemented percentage, highest first. Ties keep
    /// edition order.
    pub fn ranked(&self) -> Vec<&SetCoverage> {
        let mut ranked: Vec<&SetCoverage> = self.sets.iter().collect();
        ranked.sort_by(|a, b| b.coverage.percentage().total_cmp(&a.coverage.percentage()));
        ranked
    }

    pub fn totals(&self) -> Totals {
        self.sets
            .iter()
            .filter(|s| !s.is_unmapped())
            .fold(Totals::default(), |acc, s| Totals {
                implemented: acc.implemented + s.coverage.implemented_count(),
                missing: acc.missing + s.coverage.missing_count(),
                total: acc.total + s.coverage.total(),
            })
    }

    pub fn set(&self, code: &str) -> Option<&SetCoverage> {
        self.sets.iter().find(|s| s.code == code)
    }

    pub fn format(&self, name: &str) -> Option<&FormatCoverage> {
        self.formats.iter().find(|f| f.name == name)
    }
}

/// Split every non-ignored set into implemented and missing cards
pub fn reconcile(
    editions: &EditionIndex,
    implemented: &ImplementedCards,
    formats: &Formats,
    tracked_formats: &[String],
) -> Reconciliation {
    log::info!("Comparing datasets and outputting results.");

    let mut cards_by_set: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for (card, codes) in editions.cards() {
        for code in codes {
            cards_by_set
                .entry(code.as_str())
                .or_default()
                .insert(card.as_str());
        }
    }

    let mut result = Reconciliation {
        formats: tracked_formats
            .iter()
            .map(|name| FormatCoverage {
                name: name.clone(),
                sets: formats.legal_sets(name).to_vec(),
                coverage: Coverage::default(),
            })
            .collect(),
        ..Reconciliation::default()
    };

    for set in editions.sets() {
        if set.ignored {
            continue;
        }

        let mut coverage = Coverage::default();
        if let Some(cards) = cards_by_set.get(set.code.as_str()) {
            for card in cards {
                coverage.classify(card, implemented);
            }
        }

        log::debug!(
            "{}: {} implemented, {} missing, {} total",
            set.code,
            coverage.implemented_count(),
            coverage.missing_count(),
            coverage.total()
        );
        if coverage.total() == 0 {
            log::warn!("SetCode unknown or empty: {}", set.code);
        }

        result.distinct.merge(&coverage);
        for format in &mut result.formats {
            if format.sets.contains(&set.code) {
                format.coverage.merge(&coverage);
            }
        }

        result.sets.push(SetCoverage {
            code: set.code.clone(),
            name: set.name.clone(),
            coverage,
        });
    }

    result
}
