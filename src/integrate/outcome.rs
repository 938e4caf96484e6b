use std::fmt;
use std::path::{Path, PathBuf};

use crate::records::ClassificationRecord;

/// Why a record could not be integrated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The record is missing sequence, shot or destination
    Validation(String),
    /// The copy raised an error or left no file behind
    Copy(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Validation(message) | FailureReason::Copy(message) => {
                f.write_str(message)
            }
        }
    }
}

/// What happened to a single record during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrationOutcome {
    Completed {
        record: ClassificationRecord,
        destination: PathBuf,
    },
    Failed {
        record: ClassificationRecord,
        destination: Option<PathBuf>,
        reason: FailureReason,
    },
    Ignored {
        record: ClassificationRecord,
    },
}

impl IntegrationOutcome {
    pub fn record(&self) -> &ClassificationRecord {
        match self {
            IntegrationOutcome::Completed { record, .. }
            | IntegrationOutcome::Failed { record, .. }
            | IntegrationOutcome::Ignored { record } => record,
        }
    }

    pub fn destination(&self) -> Option<&Path> {
        match self {
            IntegrationOutcome::Completed { destination, .. } => Some(destination),
            IntegrationOutcome::Failed { destination, .. } => destination.as_deref(),
            IntegrationOutcome::Ignored { .. } => None,
        }
    }

    /// The line written to the integration log for this outcome
    pub fn report_line(&self) -> String {
        match self {
            IntegrationOutcome::Completed {
                record,
                destination,
            } => format!(
                "{} >> Copied To >> {}",
                record.source_path.display(),
                destination.display()
            ),
            IntegrationOutcome::Failed {
                record,
                destination,
                reason,
            } => {
                let destination = destination
                    .clone()
                    .unwrap_or_else(|| record.destination_path());
                format!(
                    "{} >> Failed To Copy To >> {} ({reason})",
                    record.source_path.display(),
                    destination.display()
                )
            }
            IntegrationOutcome::Ignored { record } => format!(
                "{} >> Was Set To Ignore and was not processed",
                record.source_path.display()
            ),
        }
    }
}

/// The outcomes of a run, split by kind
///
/// Every input record lands in exactly one list, and each list keeps the
/// order the records were given in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrationReport {
    pub completed: Vec<IntegrationOutcome>,
    pub failed: Vec<IntegrationOutcome>,
    pub ignored: Vec<IntegrationOutcome>,
}

impl IntegrationReport {
    pub fn total(&self) -> usize {
        self.completed.len() + self.failed.len() + self.ignored.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

impl FromIterator<IntegrationOutcome> for IntegrationReport {
    fn from_iter<I: IntoIterator<Item = IntegrationOutcome>>(outcomes: I) -> Self {
        let mut report = IntegrationReport::default();
        for outcome in outcomes {
            match outcome {
                IntegrationOutcome::Completed { .. } => report.completed.push(outcome),
                IntegrationOutcome::Failed { .. } => report.failed.push(outcome),
                IntegrationOutcome::Ignored { .. } => report.ignored.push(outcome),
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Category;

    fn record(name: &str) -> ClassificationRecord {
        ClassificationRecord {
            source_path: PathBuf::from("/in").join(name),
            filename: name.to_string(),
            sequence: "seq01".to_string(),
            shot: "seq01_010".to_string(),
            destination_root: PathBuf::from("/out"),
            category: Category::Plate,
            is_header: false,
        }
    }

    #[test]
    fn test_report_lines() {
        let completed = IntegrationOutcome::Completed {
            record: record("a.mov"),
            destination: PathBuf::from("/out/seq01/seq01_010/Plate/a.mov"),
        };
        let failed = IntegrationOutcome::Failed {
            record: record("b.mov"),
            destination: None,
            reason: FailureReason::Copy("disk full".to_string()),
        };
        let ignored = IntegrationOutcome::Ignored {
            record: record("c.mov"),
        };

        assert_eq!(
            completed.report_line(),
            "/in/a.mov >> Copied To >> /out/seq01/seq01_010/Plate/a.mov"
        );
        assert_eq!(
            failed.report_line(),
            "/in/b.mov >> Failed To Copy To >> /out/seq01/seq01_010/Plate/b.mov (disk full)"
        );
        assert_eq!(
            ignored.report_line(),
            "/in/c.mov >> Was Set To Ignore and was not processed"
        );
    }

    #[test]
    fn test_report_keeps_order_within_partitions() {
        let outcomes = vec![
            IntegrationOutcome::Ignored {
                record: record("1.mov"),
            },
            IntegrationOutcome::Completed {
                record: record("2.mov"),
                destination: PathBuf::from("/out/2.mov"),
            },
            IntegrationOutcome::Ignored {
                record: record("3.mov"),
            },
        ];

        let report: IntegrationReport = outcomes.into_iter().collect();

        assert_eq!(report.total(), 3);
        assert!(!report.has_failures());
        let ignored: Vec<&str> = report
            .ignored
            .iter()
            .map(|o| o.record().filename.as_str())
            .collect();
        assert_eq!(ignored, ["1.mov", "3.mov"]);
        assert_eq!(report.completed[0].destination(), Some(Path::new("/out/2.mov")));
    }
}
