//! One reconciliation run, from source directories to report files

use crate::cardsfolder::ImplementedCards;
use crate::config::TrackingConfig;
use crate::edition::EditionIndex;
use crate::error::Result;
use crate::formats::Formats;
use crate::reconcile::{reconcile, Reconciliation};
use crate::report::ReportWriter;
use mtg_common::OracleCatalog;

/// Parse every source, reconcile, and write the reports.
///
/// Missing edition or card directories and an unavailable oracle catalog
/// abort the run. A missing formats directory only leaves the format
/// reports empty.
pub fn run(config: &TrackingConfig) -> Result<Reconciliation> {
    let editions = EditionIndex::load_dir(&config.editions_dir, &config.edition_rules())?;
    let implemented = ImplementedCards::load_dir(&config.cards_dir)?;
    let oracle = OracleCatalog::load_or_fetch(&config.oracle_cache, &config.oracle_url)?;

    let formats = match Formats::load_dir(&config.formats_dir, &config.format_files) {
        Ok(formats) => formats,
        Err(e) => {
            log::warn!("No formats loaded: {}", e);
            Formats::new()
        }
    };

    let result = reconcile(&editions, &implemented, &formats, &config.tracked_formats);

    let mut writer = ReportWriter::new(
        &config.output_dir,
        &oracle,
        config.print_implemented,
        config.write_release,
    )?;
    writer.write_all(&result)?;
    writer.finish()?;

    log::info!("Reports written to {}", config.output_dir.display());
    Ok(result)
}
