// Declare modules
pub mod cli;
pub mod config;
pub mod materializer;
pub mod merger;
pub mod models;
pub mod scanner;
pub mod walker;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::path::Path;

use self::cli::Cli;
use self::config::resolve_config;
use self::materializer::Materializer;
use self::merger::{Merger, MERGED_FILE_NAME};
use self::models::{CopyReport, RuntimeConfig, RunSummary};
use self::scanner::Scanner;
use self::walker::FolderWalker;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();

    let current_dir = env::current_dir().context("Failed to get current directory")?;

    run_with(args, &current_dir)?;
    Ok(())
}

/// Loads the configuration and runs the pipeline. Returns `None` when the
/// configuration could not be loaded, in which case nothing was written.
pub fn run_with(args: Cli, current_dir: &Path) -> Result<Option<RunSummary>> {
    // 2. Load Configuration
    let config = match resolve_config(args, current_dir) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Failed to load configuration: {}", err);
            return Ok(None);
        }
    };

    log::info!("Configuration loaded from {}", config.config_dir.display());
    log::info!("Project root: {}", config.project_root.display());
    log::info!("Target extensions: {:?}", config.extensions);
    log::info!("Target folders: {:?}", config.folders.entries());

    execute(&config).map(Some)
}

/// Runs the pipeline for an already loaded configuration.
pub fn execute(config: &RuntimeConfig) -> Result<RunSummary> {
    // 3. Output Directory
    let materializer = Materializer::create(&config.output_base)?;

    // 4. Discover Files
    log::info!("Searching for files...");
    let targets = FolderWalker::new(&config.project_root).resolve(&config.folders);
    let found = Scanner::new(&config.extensions).collect_all(&targets);

    if found.is_empty() {
        log::warn!("No matching files found");
        return Ok(RunSummary {
            output_dir: materializer.dir().to_path_buf(),
            found: 0,
            copies: CopyReport::default(),
            merged: None,
        });
    }

    log::info!("Found {} files", found.len());

    // 5. Copy
    log::info!("Copying files...");
    let copies = materializer.copy_all(&found);

    // 6. Merge
    log::info!("Merging files...");
    let merged = Merger::merge(materializer.dir());
    log::info!("Merged {} files", merged);
    log::info!(
        "Merged file: {}",
        materializer.dir().join(MERGED_FILE_NAME).display()
    );

    log::info!("Done!");
    log::info!("Copied: {} files", copies.copied);
    log::info!("Output directory: {}", materializer.dir().display());
    log::info!("Failed: {} files", copies.failed);

    Ok(RunSummary {
        output_dir: materializer.dir().to_path_buf(),
        found: found.len(),
        copies,
        merged: Some(merged),
    })
}
