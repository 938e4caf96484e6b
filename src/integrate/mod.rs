//! Integration of classified records into the pipeline folder layout

mod engine;
mod file_operations;
mod outcome;
mod report;

pub use engine::{IntegrationOptions, Integrator};
pub use outcome::{FailureReason, IntegrationOutcome, IntegrationReport};
pub use report::{COMPLETED_SECTION, FAILED_SECTION, IGNORED_SECTION, LogReporter, Reporter};
