use std::path::PathBuf;

use atty::Stream;
use clap::builder::BoolishValueParser;
use clap::{
    Arg, ArgAction, ArgMatches, Command, command, crate_description, crate_name, crate_version,
    value_parser,
};

use crate::config::ConfigStore;
use crate::constants::{
    CONFIG_HELP, DEFAULT_MANIFEST_PATH, DESTINATION_HELP, DRY_RUN_HELP, LOG_FILE_HELP,
    MANIFEST_OUTPUT_HELP, PARALLEL_HELP, PAUSE_HELP, VERBOSE_HELP,
};
use crate::errors::{Result, generic_error};
use crate::integrate::IntegrationOptions;
use crate::logging::LogLevel;
use crate::records::{Category, RecordEdit};

/// Checks if stdout is a terminal and waits for user input if it is
///
/// This function is used to prevent the console window from closing
/// immediately after the program finishes when run from a GUI.
pub fn check_for_stdout_stream() {
    if atty::is(Stream::Stdout) {
        dont_disappear::enter_to_continue::default();
    }
}

/// A parsed `cfm` subcommand
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Scan {
        paths: Vec<PathBuf>,
        manifest: PathBuf,
        destination: Option<PathBuf>,
    },
    Edit {
        manifest: PathBuf,
        path: PathBuf,
        edits: Vec<RecordEdit>,
    },
    Remove {
        manifest: PathBuf,
        path: PathBuf,
    },
    Integrate {
        manifest: PathBuf,
        options: IntegrationOptions,
    },
    Folders,
    ConfigShow,
    ConfigSet {
        output: Option<PathBuf>,
        logging: Option<PathBuf>,
        logging_enabled: Option<bool>,
    },
}

fn manifest_arg() -> Arg {
    Arg::new("manifest")
        .help("Manifest file holding the records")
        .required(true)
        .value_parser(value_parser!(PathBuf))
}

fn record_path_arg() -> Arg {
    Arg::new("path")
        .help("Selected folder or file the records were created from")
        .required(true)
        .value_parser(value_parser!(PathBuf))
}

fn scan_command() -> Command {
    Command::new("scan")
        .about("Catalog files and folders and write their records to a manifest")
        .arg(
            Arg::new("paths")
                .help("Files or folders delivered by the client")
                .required(true)
                .num_args(1..)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help(MANIFEST_OUTPUT_HELP)
                .default_value(DEFAULT_MANIFEST_PATH)
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("destination")
                .short('d')
                .long("destination")
                .help(DESTINATION_HELP)
                .value_parser(value_parser!(PathBuf)),
        )
}

fn edit_command() -> Command {
    Command::new("edit")
        .about("Change the classification of a record, folder edits apply to every file")
        .arg(manifest_arg())
        .arg(record_path_arg())
        .arg(Arg::new("sequence").long("sequence").help("New sequence"))
        .arg(Arg::new("shot").long("shot").help("New shot"))
        .arg(
            Arg::new("destination")
                .long("destination")
                .help("New destination root")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .help("New category: Plate, Texture, Model, Mocap, Reference or Ignore"),
        )
}

fn integrate_command() -> Command {
    Command::new("integrate")
        .about("Copy the records of a manifest into the pipeline folder layout")
        .arg(manifest_arg())
        .arg(
            Arg::new("dry")
                .short('n')
                .long("dry")
                .help(DRY_RUN_HELP)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("parallel")
                .short('p')
                .long("parallel")
                .help(PARALLEL_HELP)
                .action(ArgAction::SetTrue),
        )
}

fn config_command() -> Command {
    Command::new("config")
        .about("Show or change the configuration")
        .subcommand_required(true)
        .subcommand(Command::new("show").about("Print the current configuration"))
        .subcommand(
            Command::new("set")
                .about("Change configuration values")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .help("Default destination root")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("logging")
                        .long("logging")
                        .help("Folder receiving integration logs")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("logging_status")
                        .long("logging-status")
                        .help("Write a log file for every integration run")
                        .value_parser(BoolishValueParser::new()),
                ),
        )
}

/// Builds the `cfm` command definition
pub fn build_command() -> Command {
    // define arg for reading from a specific config file
    let arg_config = Arg::new("config")
        .short('c')
        .long("config")
        .help(CONFIG_HELP)
        .global(true)
        .value_parser(value_parser!(PathBuf));

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .global(true)
        .action(ArgAction::Count);

    // define arg for log file
    let log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .help(LOG_FILE_HELP)
        .global(true)
        .value_parser(value_parser!(PathBuf));

    let pause = Arg::new("pause")
        .long("pause")
        .help(PAUSE_HELP)
        .global(true)
        .action(ArgAction::SetTrue);

    command!()
        .about(crate_description!())
        .name(crate_name!())
        .version(crate_version!())
        .bin_name("cfm")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(arg_config)
        .arg(arg_verbose)
        .arg(log_file)
        .arg(pause)
        .subcommand(scan_command())
        .subcommand(edit_command())
        .subcommand(
            Command::new("remove")
                .about("Remove a selected folder or a single file from a manifest")
                .arg(manifest_arg())
                .arg(record_path_arg()),
        )
        .subcommand(integrate_command())
        .subcommand(
            Command::new("folders")
                .about("List the sequence and shot folders in the output location"),
        )
        .subcommand(config_command())
}

/// Parses the process arguments
pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}

/// Gets the verbosity level from the number of -v/--verbose flags
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    let verbose_count = matches.get_count("verbose");
    LogLevel::from_occurrences(verbose_count)
}

/// The log file given on the command line, if any
pub fn get_log_file(matches: &ArgMatches) -> Option<PathBuf> {
    matches.get_one::<PathBuf>("log_file").cloned()
}

pub fn should_pause(matches: &ArgMatches) -> bool {
    matches.get_flag("pause")
}

/// The configuration store named by `--config`, or the per-user one
///
/// # Errors
/// Returns an error if the per-user configuration folder cannot be determined
pub fn get_config_store(matches: &ArgMatches) -> anyhow::Result<ConfigStore> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => Ok(ConfigStore::new(path)),
        None => ConfigStore::default_location(),
    }
}

fn path_value(matches: &ArgMatches, id: &str) -> Option<PathBuf> {
    matches.get_one::<PathBuf>(id).cloned()
}

fn required_path(matches: &ArgMatches, id: &str) -> Result<PathBuf> {
    path_value(matches, id).ok_or_else(|| generic_error(&format!("Missing argument <{id}>")))
}

fn record_edits(matches: &ArgMatches) -> Result<Vec<RecordEdit>> {
    let mut edits = Vec::new();
    if let Some(sequence) = matches.get_one::<String>("sequence") {
        edits.push(RecordEdit::Sequence(sequence.clone()));
    }
    if let Some(shot) = matches.get_one::<String>("shot") {
        edits.push(RecordEdit::Shot(shot.clone()));
    }
    if let Some(destination) = path_value(matches, "destination") {
        edits.push(RecordEdit::Destination(destination));
    }
    if let Some(category) = matches.get_one::<String>("category") {
        edits.push(RecordEdit::Category(category.parse::<Category>()?));
    }

    if edits.is_empty() {
        return Err(generic_error(
            "Nothing to edit, pass at least one of --sequence, --shot, --destination or --category",
        ));
    }
    Ok(edits)
}

/// Turns the subcommand matches into a [`CliCommand`]
///
/// # Errors
/// Returns an error for an unknown category or an edit without any change
pub fn get_command(matches: &ArgMatches) -> Result<CliCommand> {
    match matches.subcommand() {
        Some(("scan", sub)) => Ok(CliCommand::Scan {
            paths: sub
                .get_many::<PathBuf>("paths")
                .map(|paths| paths.cloned().collect())
                .unwrap_or_default(),
            manifest: path_value(sub, "output")
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MANIFEST_PATH)),
            destination: path_value(sub, "destination"),
        }),
        Some(("edit", sub)) => Ok(CliCommand::Edit {
            manifest: required_path(sub, "manifest")?,
            path: required_path(sub, "path")?,
            edits: record_edits(sub)?,
        }),
        Some(("remove", sub)) => Ok(CliCommand::Remove {
            manifest: required_path(sub, "manifest")?,
            path: required_path(sub, "path")?,
        }),
        Some(("integrate", sub)) => Ok(CliCommand::Integrate {
            manifest: required_path(sub, "manifest")?,
            options: IntegrationOptions {
                dry_run: sub.get_flag("dry"),
                parallel: sub.get_flag("parallel"),
            },
        }),
        Some(("folders", _)) => Ok(CliCommand::Folders),
        Some(("config", sub)) => match sub.subcommand() {
            Some(("set", set)) => Ok(CliCommand::ConfigSet {
                output: path_value(set, "output"),
                logging: path_value(set, "logging"),
                logging_enabled: set.get_one::<bool>("logging_status").copied(),
            }),
            _ => Ok(CliCommand::ConfigShow),
        },
        Some((name, _)) => Err(generic_error(&format!("Unknown command '{name}'"))),
        None => Err(generic_error("No command given")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let matches = build_command().get_matches_from(args);
        get_command(&matches).unwrap()
    }

    #[test]
    fn test_command_definition_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_scan_defaults() {
        let command = parse(&["cfm", "scan", "/in/day01", "/in/b.mov"]);

        assert_eq!(
            command,
            CliCommand::Scan {
                paths: vec![PathBuf::from("/in/day01"), PathBuf::from("/in/b.mov")],
                manifest: PathBuf::from("manifest.yaml"),
                destination: None,
            }
        );
    }

    #[test]
    fn test_edit_collects_every_change() {
        let command = parse(&[
            "cfm", "edit", "m.yaml", "/in/day01", "--sequence", "seq01", "--category", "texture",
        ]);

        let CliCommand::Edit { edits, .. } = command else {
            panic!("expected an edit command");
        };
        assert_eq!(
            edits,
            [
                RecordEdit::Sequence("seq01".to_string()),
                RecordEdit::Category(Category::Texture)
            ]
        );
    }

    #[test]
    fn test_edit_rejects_unknown_category() {
        let matches = build_command().get_matches_from([
            "cfm", "edit", "m.yaml", "/in/a.mov", "--category", "elements",
        ]);

        assert!(get_command(&matches).is_err());
    }

    #[test]
    fn test_edit_without_changes_is_an_error() {
        let matches = build_command().get_matches_from(["cfm", "edit", "m.yaml", "/in/a.mov"]);

        assert!(get_command(&matches).is_err());
    }

    #[test]
    fn test_integrate_flags_and_globals() {
        let matches = build_command().get_matches_from([
            "cfm", "-vv", "integrate", "m.yaml", "--dry", "-p", "--log-file", "run.log",
        ]);

        assert_eq!(get_verbosity(&matches), LogLevel::Trace);
        assert_eq!(get_log_file(&matches), Some(PathBuf::from("run.log")));
        assert!(!should_pause(&matches));
        assert_eq!(
            get_command(&matches).unwrap(),
            CliCommand::Integrate {
                manifest: PathBuf::from("m.yaml"),
                options: IntegrationOptions {
                    dry_run: true,
                    parallel: true
                },
            }
        );
    }

    #[test]
    fn test_config_set() {
        let command = parse(&["cfm", "config", "set", "--logging-status", "false"]);

        assert_eq!(
            command,
            CliCommand::ConfigSet {
                output: None,
                logging: None,
                logging_enabled: Some(false),
            }
        );
        assert_eq!(parse(&["cfm", "config", "show"]), CliCommand::ConfigShow);
    }
}
