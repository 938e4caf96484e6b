use std::path::PathBuf;
use std::process::exit;

use anyhow::Result;
use clap::ArgMatches;
use human_panic::setup_panic;
use log::error;

use client_file_manager::cli::{
    CliCommand, check_for_stdout_stream, get_command, get_config_store, get_log_file,
    get_matches, get_verbosity, should_pause,
};
use client_file_manager::config::ConfigStore;
use client_file_manager::logging::init_logger;
use client_file_manager::workflow::execute;

/// Resolves the command, the configuration store and the log file for this run
///
/// Integration runs log to the configured logging location unless a log
/// file was given on the command line.
fn prepare(matches: &ArgMatches) -> Result<(CliCommand, ConfigStore, Option<PathBuf>)> {
    let command = get_command(matches)?;
    let store = get_config_store(matches)?;

    let log_file = match get_log_file(matches) {
        Some(log_file) => Some(log_file),
        None if matches!(command, CliCommand::Integrate { .. }) => {
            store.load()?.integration_log()
        }
        None => None,
    };

    Ok((command, store, log_file))
}

fn main() {
    setup_panic!();

    let matches = get_matches();
    let verbosity = get_verbosity(&matches);

    let code = match prepare(&matches) {
        Ok((command, store, log_file)) => match init_logger(verbosity, log_file.as_deref()) {
            Ok(()) => match execute(command, &store) {
                Ok(true) => 0,
                Ok(false) => 1,
                Err(e) => {
                    error!("{e:#}");
                    1
                }
            },
            Err(e) => {
                eprintln!("Failed to initialise logging: {e:#}");
                1
            }
        },
        Err(e) => {
            if init_logger(verbosity, None).is_ok() {
                error!("{e:#}");
            } else {
                eprintln!("{e:#}");
            }
            1
        }
    };

    if should_pause(&matches) {
        check_for_stdout_stream();
    }
    exit(code);
}
