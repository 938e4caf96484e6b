//! Workflow engine
//!
//! This module runs the `cfm` commands against the manifest and the
//! configuration store.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use colored::Colorize;
use log::{debug, info};

use crate::cli::CliCommand;
use crate::config::{ConfigStore, Configuration, OutputFolders};
use crate::integrate::{IntegrationOptions, IntegrationReport, Integrator, LogReporter, Reporter};
use crate::logging::format_message;
use crate::records::{RecordEdit, WorkingSet};
use crate::utils::{absolute_path, display_relative, format_size};

/// Runs a parsed command
///
/// Returns false when the command finished but some records failed to
/// integrate.
///
/// # Errors
/// Returns an error if the manifest or the configuration cannot be used
pub fn execute(command: CliCommand, store: &ConfigStore) -> Result<bool> {
    match command {
        CliCommand::Scan {
            paths,
            manifest,
            destination,
        } => {
            let destination = match destination {
                Some(destination) => absolute_path(&destination)?,
                None => store.load()?.output_location,
            };
            let set = scan_paths(&paths, &manifest, &destination)?;
            print_records(&set)?;
        }
        CliCommand::Edit {
            manifest,
            path,
            edits,
        } => {
            let changed = edit_records(&manifest, &path, &edits)?;
            println!("Updated {changed} records in {}", manifest.display());
        }
        CliCommand::Remove { manifest, path } => {
            remove_records(&manifest, &path)?;
            println!("Removed {} from {}", path.display(), manifest.display());
        }
        CliCommand::Integrate { manifest, options } => {
            let report = integrate_manifest(&manifest, options, &LogReporter)?;
            print_summary(&report, options);
            return Ok(!report.has_failures());
        }
        CliCommand::Folders => {
            let config = store.load()?;
            let folders = OutputFolders::discover(&config.output_location)?;
            print_folders(&folders);
        }
        CliCommand::ConfigShow => {
            let config = store.load()?;
            print_configuration(store.path(), &config);
        }
        CliCommand::ConfigSet {
            output,
            logging,
            logging_enabled,
        } => {
            let config = update_configuration(store, output, logging, logging_enabled)?;
            print_configuration(store.path(), &config);
        }
    }
    Ok(true)
}

/// Adds the records of every path to the manifest and saves it
///
/// An existing manifest is extended, paths scanned before are replaced.
///
/// # Errors
/// Returns an error if a path cannot be cataloged or the manifest cannot be written
pub fn scan_paths(paths: &[PathBuf], manifest: &Path, destination: &Path) -> Result<WorkingSet> {
    let mut set = WorkingSet::load_or_default(manifest)?;

    for path in paths {
        let path = absolute_path(path)?;
        let added = set
            .add_path(&path, destination)
            .with_context(|| format!("Failed to scan {}", path.display()))?;
        debug!("Added {added} records for {}", path.display());
    }

    set.save(manifest)?;
    info!("Wrote {} records to {}", set.len(), manifest.display());
    Ok(set)
}

/// Applies `edits` to the record created from `path`
///
/// Returns the number of records changed by the last edit.
///
/// # Errors
/// Returns an error if the manifest has no record for `path`
pub fn edit_records(manifest: &Path, path: &Path, edits: &[RecordEdit]) -> Result<usize> {
    let mut set = WorkingSet::load(manifest)?;
    let path = absolute_path(path)?;

    let mut changed = 0;
    for edit in edits {
        changed = set.edit(&path, edit)?;
    }

    set.save(manifest)?;
    Ok(changed)
}

/// Removes the group or record created from `path`
///
/// # Errors
/// Returns an error if the manifest has no record for `path`
pub fn remove_records(manifest: &Path, path: &Path) -> Result<()> {
    let mut set = WorkingSet::load(manifest)?;
    let path = absolute_path(path)?;

    if !set.remove(&path) {
        return Err(anyhow!(
            "No record found for {} in {}",
            path.display(),
            manifest.display()
        ));
    }

    set.save(manifest)?;
    Ok(())
}

/// Integrates every record of the manifest
///
/// # Errors
/// Returns an error if the manifest cannot be read
pub fn integrate_manifest(
    manifest: &Path,
    options: IntegrationOptions,
    reporter: &dyn Reporter,
) -> Result<IntegrationReport> {
    let set = WorkingSet::load(manifest)?;
    if set.is_empty() {
        reporter.warning(&format!("{} holds no records", manifest.display()));
    }

    Ok(Integrator::new(options).run(&set.records(), reporter))
}

/// Changes the given configuration values and saves the result
///
/// # Errors
/// Returns an error if the configuration cannot be read or written
pub fn update_configuration(
    store: &ConfigStore,
    output: Option<PathBuf>,
    logging: Option<PathBuf>,
    logging_enabled: Option<bool>,
) -> Result<Configuration> {
    let mut config = store.load()?;

    if let Some(output) = output {
        config.output_location = absolute_path(&output)?;
    }
    if let Some(logging) = logging {
        config.logging_location = absolute_path(&logging)?;
    }
    if let Some(enabled) = logging_enabled {
        config.logging_enabled = enabled;
    }

    store.save(&config)?;
    Ok(config)
}

fn print_records(set: &WorkingSet) -> Result<()> {
    for group in set.groups() {
        let root = group.header().map(|header| header.source_path.as_path());
        for record in group.iter() {
            let name = if record.is_header {
                record.source_path.display().to_string()
            } else {
                display_relative(&record.source_path, root)
            };
            let line = format!(
                "{name} | {} | {} | {} | {}",
                record.sequence,
                record.shot,
                record.category,
                record.destination_root.display()
            );
            if record.is_header {
                println!("{}", format_message(&line, &line.bold().to_string()));
            } else {
                println!("{line}");
            }
        }
    }

    let size = format_size(set.cumulative_size()?);
    println!("Total size: {size}");
    Ok(())
}

fn print_summary(report: &IntegrationReport, options: IntegrationOptions) {
    let completed = format!("Completed: {}", report.completed.len());
    let failed = format!("Failed: {}", report.failed.len());
    let ignored = format!("Ignored: {}", report.ignored.len());

    println!();
    println!(
        "{}",
        format_message(&completed, &completed.green().to_string())
    );
    println!("{}", format_message(&failed, &failed.red().to_string()));
    println!("{}", format_message(&ignored, &ignored.yellow().to_string()));

    if options.dry_run {
        println!("\nRun without --dry flag to copy these files.");
    }
}

fn print_folders(folders: &OutputFolders) {
    if folders.is_empty() {
        println!("No sequence folders in {}", folders.root().display());
        return;
    }

    for sequence in folders.folders() {
        println!(
            "{}",
            format_message(&sequence.name, &sequence.name.bold().to_string())
        );
        for shot in &sequence.shots {
            println!("  {shot}");
        }
    }
}

fn print_configuration(path: &Path, config: &Configuration) {
    println!("Configuration file: {}", path.display());
    println!("Output location:    {}", config.output_location.display());
    println!("Logging location:   {}", config.logging_location.display());
    println!(
        "Logging enabled:    {}",
        if config.logging_enabled { "True" } else { "False" }
    );
}
