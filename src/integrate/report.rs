//! Reporting of integration runs
//!
//! The integrator talks to a [`Reporter`] instead of writing log lines
//! itself, so a front end can show progress its own way.

use log::{Level, error, info, log, warn};

use crate::constants::INTEGRATION_TARGET;
use crate::integrate::outcome::IntegrationOutcome;

pub const COMPLETED_SECTION: &str = "**** Successful Integration ****";
pub const FAILED_SECTION: &str = "**** Failed Integration ****";
pub const IGNORED_SECTION: &str = "**** Ignored Integration ****";

/// Receives progress messages and the final outcome lists of a run
///
/// Implementations are shared between worker threads in parallel runs.
pub trait Reporter: Send + Sync {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);

    fn completed_files(&self, outcomes: &[IntegrationOutcome]);
    fn failed_files(&self, outcomes: &[IntegrationOutcome]);
    fn ignored_files(&self, outcomes: &[IntegrationOutcome]);
}

/// Forwards everything to the `log` facade under the integration target
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl LogReporter {
    fn section(header: &str, level: Level, outcomes: &[IntegrationOutcome]) {
        info!(target: INTEGRATION_TARGET, "{header}");
        for outcome in outcomes {
            log!(target: INTEGRATION_TARGET, level, "{}", outcome.report_line());
        }
    }
}

impl Reporter for LogReporter {
    fn info(&self, message: &str) {
        info!(target: INTEGRATION_TARGET, "{message}");
    }

    fn warning(&self, message: &str) {
        warn!(target: INTEGRATION_TARGET, "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: INTEGRATION_TARGET, "{message}");
    }

    fn completed_files(&self, outcomes: &[IntegrationOutcome]) {
        LogReporter::section(COMPLETED_SECTION, Level::Info, outcomes);
    }

    fn failed_files(&self, outcomes: &[IntegrationOutcome]) {
        LogReporter::section(FAILED_SECTION, Level::Error, outcomes);
    }

    fn ignored_files(&self, outcomes: &[IntegrationOutcome]) {
        LogReporter::section(IGNORED_SECTION, Level::Warn, outcomes);
    }
}
