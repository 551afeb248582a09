//! Edition Tracking - implemented-card coverage per set and format
//!
//! Parses edition definitions, implemented card definitions and format
//! definitions, reconciles them against the oracle catalog and writes
//! plain-text coverage reports.

pub mod cardsfolder;
pub mod config;
pub mod edition;
pub mod error;
pub mod files;
pub mod formats;
pub mod pipeline;
pub mod reconcile;
pub mod report;

pub use cardsfolder::ImplementedCards;
pub use config::TrackingConfig;
pub use edition::{EditionIndex, EditionRules, SetInfo};
pub use error::{Result, TrackingError};
pub use formats::{Format, Formats};
pub use pipeline::run;
pub use reconcile::{reconcile, Coverage, Reconciliation, SetCoverage};
pub use report::ReportWriter;
