//! Edition Tracking
//!
//! Reports how many cards of each set and format are implemented.

use clap::Parser;
use edition_tracking::TrackingConfig;
use std::path::PathBuf;

/// Implemented-card coverage reports per set and format
#[derive(Parser, Debug)]
#[command(name = "edition_tracking")]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resource root containing editions/, cardsfolder/ and formats/
    #[arg(short, long)]
    res_dir: Option<PathBuf>,

    /// Directory the reports are written to
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Oracle catalog cache file (downloaded when absent)
    #[arg(long)]
    oracle_cache: Option<PathBuf>,

    /// Oracle catalog download URL
    #[arg(long)]
    oracle_url: Option<String>,

    /// List implemented cards in the distinct and format reports
    #[arg(long, default_value_t = false)]
    print_implemented: bool,

    /// Skip the combined release report
    #[arg(long, default_value_t = false)]
    no_release: bool,
}

impl Args {
    fn into_config(self) -> edition_tracking::Result<TrackingConfig> {
        let mut config = match &self.config {
            Some(path) => TrackingConfig::load(path)?,
            None => TrackingConfig::default(),
        };
        if let Some(res_dir) = &self.res_dir {
            config = config.with_res_dir(res_dir);
        }
        if let Some(output_dir) = self.output_dir {
            config.output_dir = output_dir;
        }
        if let Some(oracle_cache) = self.oracle_cache {
            config.oracle_cache = oracle_cache;
        }
        if let Some(oracle_url) = self.oracle_url {
            config.oracle_url = oracle_url;
        }
        if self.print_implemented {
            config.print_implemented = true;
        }
        if self.no_release {
            config.write_release = false;
        }
        Ok(config)
    }
}

fn main() {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=edition_tracking=debug
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("Starting edition_tracking...");
    log::info!("Editions: {}", config.editions_dir.display());
    log::info!("Cards: {}", config.cards_dir.display());

    if let Err(e) = edition_tracking::run(&config) {
        log::error!("Edition tracking failed: {}", e);
        std::process::exit(1);
    }

    log::info!("Done!");
}
