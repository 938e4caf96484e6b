//! Batch integration of classified records
//!
//! Each record is validated, then copied to
//! `destination_root/sequence/shot/category/filename`. A failing record never
//! stops the batch; every record ends up in exactly one list of the report.

use rayon::prelude::*;

use crate::integrate::file_operations::{copy_file, ensure_directory};
use crate::integrate::outcome::{FailureReason, IntegrationOutcome, IntegrationReport};
use crate::integrate::report::Reporter;
use crate::records::ClassificationRecord;

/// Options for an integration run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntegrationOptions {
    /// Plan the copies without touching the filesystem
    pub dry_run: bool,
    /// Copy records on the rayon thread pool
    pub parallel: bool,
}

/// Runs the batch copy for a list of records
#[derive(Debug, Clone, Copy, Default)]
pub struct Integrator {
    options: IntegrationOptions,
}

impl Integrator {
    pub fn new(options: IntegrationOptions) -> Self {
        Integrator { options }
    }

    /// Integrates every record and hands the three outcome lists to `reporter`
    ///
    /// Per-record problems are reported and collected, never returned.
    pub fn run(
        &self,
        records: &[ClassificationRecord],
        reporter: &dyn Reporter,
    ) -> IntegrationReport {
        reporter.info(&format!(
            "Integrating {} records{}",
            records.len(),
            if self.options.dry_run { " (dry run)" } else { "" }
        ));

        let report: IntegrationReport = if self.options.parallel {
            records
                .par_iter()
                .map(|record| self.integrate_record(record, reporter))
                .collect::<Vec<_>>()
                .into_iter()
                .collect()
        } else {
            records
                .iter()
                .map(|record| self.integrate_record(record, reporter))
                .collect()
        };

        reporter.completed_files(&report.completed);
        reporter.failed_files(&report.failed);
        reporter.ignored_files(&report.ignored);
        report
    }

    fn integrate_record(
        &self,
        record: &ClassificationRecord,
        reporter: &dyn Reporter,
    ) -> IntegrationOutcome {
        if record.is_ignored() {
            reporter.info(&format!(
                "{} is set to Ignore, skipping",
                record.source_path.display()
            ));
            return IntegrationOutcome::Ignored {
                record: record.clone(),
            };
        }

        if let Err(e) = record.validate() {
            reporter.error(&e.to_string());
            return IntegrationOutcome::Failed {
                record: record.clone(),
                destination: None,
                reason: FailureReason::Validation(e.to_string()),
            };
        }

        let directory = record.destination_directory();
        if record.is_header {
            return IntegrationOutcome::Completed {
                record: record.clone(),
                destination: directory,
            };
        }

        let destination = record.destination_path();
        if self.options.dry_run {
            reporter.info(&format!(
                "Would copy {} to {}",
                record.source_path.display(),
                destination.display()
            ));
            return IntegrationOutcome::Completed {
                record: record.clone(),
                destination,
            };
        }

        let copied = ensure_directory(&directory).and_then(|created| {
            if created {
                reporter.info(&format!("Created directory {}", directory.display()));
            }
            copy_file(&record.source_path, &destination)
        });

        match copied {
            Ok(()) => {
                reporter.info(&format!(
                    "Copied {} to {}",
                    record.source_path.display(),
                    destination.display()
                ));
                IntegrationOutcome::Completed {
                    record: record.clone(),
                    destination,
                }
            }
            Err(e) => {
                reporter.error(&format!(
                    "Failed to copy {}: {e}",
                    record.source_path.display()
                ));
                IntegrationOutcome::Failed {
                    record: record.clone(),
                    destination: Some(destination),
                    reason: FailureReason::Copy(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Category;
    use std::fs;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;
    use tempfile::tempdir;

    #[derive(Default)]
    struct RecordingReporter {
        errors: Mutex<Vec<String>>,
        batches: Mutex<Vec<(&'static str, usize)>>,
    }

    impl Reporter for RecordingReporter {
        fn info(&self, _message: &str) {}
        fn warning(&self, _message: &str) {}
        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
        fn completed_files(&self, outcomes: &[IntegrationOutcome]) {
            self.batches.lock().unwrap().push(("completed", outcomes.len()));
        }
        fn failed_files(&self, outcomes: &[IntegrationOutcome]) {
            self.batches.lock().unwrap().push(("failed", outcomes.len()));
        }
        fn ignored_files(&self, outcomes: &[IntegrationOutcome]) {
            self.batches.lock().unwrap().push(("ignored", outcomes.len()));
        }
    }

    fn record(source: &Path, destination_root: &Path) -> ClassificationRecord {
        ClassificationRecord {
            source_path: source.to_path_buf(),
            filename: source.file_name().unwrap().to_str().unwrap().to_string(),
            sequence: "seq01".to_string(),
            shot: "seq01_010".to_string(),
            destination_root: destination_root.to_path_buf(),
            category: Category::Plate,
            is_header: false,
        }
    }

    #[test]
    fn test_copies_into_pipeline_layout() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("a.mov");
        fs::write(&source, b"frames").unwrap();
        let out = temp_dir.path().join("out");
        let reporter = RecordingReporter::default();

        let report = Integrator::default().run(&[record(&source, &out)], &reporter);

        let expected = out.join("seq01/seq01_010/Plate/a.mov");
        assert_eq!(report.completed.len(), 1);
        assert_eq!(report.completed[0].destination(), Some(expected.as_path()));
        assert_eq!(fs::read(&expected).unwrap(), b"frames");
        assert_eq!(
            *reporter.batches.lock().unwrap(),
            [("completed", 1), ("failed", 0), ("ignored", 0)]
        );
    }

    #[test]
    fn test_ignored_record_is_never_validated() {
        let temp_dir = tempdir().unwrap();
        let mut ignored = record(&temp_dir.path().join("a.mov"), Path::new(""));
        ignored.sequence.clear();
        ignored.category = Category::Ignore;
        let reporter = RecordingReporter::default();

        let report = Integrator::default().run(&[ignored], &reporter);

        assert_eq!(report.ignored.len(), 1);
        assert!(report.failed.is_empty());
        assert!(reporter.errors.lock().unwrap().is_empty());
    }

    #[test]
    fn test_validation_failure_does_no_io() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("a.mov");
        fs::write(&source, b"frames").unwrap();
        let out = temp_dir.path().join("out");
        let mut invalid = record(&source, &out);
        invalid.shot = "  ".to_string();
        let reporter = RecordingReporter::default();

        let report = Integrator::default().run(&[invalid], &reporter);

        assert_eq!(report.failed.len(), 1);
        assert!(matches!(
            &report.failed[0],
            IntegrationOutcome::Failed {
                reason: FailureReason::Validation(_),
                destination: None,
                ..
            }
        ));
        assert!(!out.exists());
        assert_eq!(reporter.errors.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_header_is_completed_without_copy() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("out");
        let mut header = record(temp_dir.path(), &out);
        header.filename.clear();
        header.is_header = true;

        let report = Integrator::default().run(&[header], &RecordingReporter::default());

        assert_eq!(
            report.completed[0].destination(),
            Some(out.join("seq01/seq01_010").as_path())
        );
        assert!(!out.exists());
    }

    #[test]
    fn test_copy_failure_does_not_stop_the_batch() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("a.mov");
        fs::write(&source, b"frames").unwrap();
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, b"not a folder").unwrap();
        let out = temp_dir.path().join("out");
        let reporter = RecordingReporter::default();

        let report = Integrator::default().run(
            &[record(&source, &blocker), record(&source, &out)],
            &reporter,
        );

        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.completed.len(), 1);
        assert!(matches!(
            &report.failed[0],
            IntegrationOutcome::Failed {
                reason: FailureReason::Copy(_),
                ..
            }
        ));
        assert!(out.join("seq01/seq01_010/Plate/a.mov").is_file());
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let temp_dir = tempdir().unwrap();
        let source = temp_dir.path().join("a.mov");
        fs::write(&source, b"frames").unwrap();
        let out = temp_dir.path().join("out");
        let integrator = Integrator::new(IntegrationOptions {
            dry_run: true,
            parallel: false,
        });

        let report = integrator.run(&[record(&source, &out)], &RecordingReporter::default());

        assert_eq!(report.completed.len(), 1);
        assert_eq!(
            report.completed[0].destination(),
            Some(out.join("seq01/seq01_010/Plate/a.mov").as_path())
        );
        assert!(!out.exists());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let temp_dir = tempdir().unwrap();
        let out = temp_dir.path().join("out");
        let mut records = Vec::new();
        for index in 0..20 {
            let source = temp_dir.path().join(format!("file{index:02}.exr"));
            fs::write(&source, index.to_string()).unwrap();
            let mut record = record(&source, &out);
            if index % 3 == 0 {
                record.category = Category::Ignore;
            }
            if index % 5 == 0 {
                record.sequence.clear();
            }
            records.push(record);
        }

        let sequential = Integrator::default().run(&records, &RecordingReporter::default());
        let parallel = Integrator::new(IntegrationOptions {
            dry_run: false,
            parallel: true,
        })
        .run(&records, &RecordingReporter::default());

        assert_eq!(sequential, parallel);
        assert_eq!(parallel.total(), records.len());
        let order: Vec<PathBuf> = parallel
            .completed
            .iter()
            .map(|o| o.record().source_path.clone())
            .collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }
}
