pub mod categorizer;
pub mod mover;
pub mod report;

pub use categorizer::{Categorizer, SizeGroups};
pub use mover::FileMover;
pub use report::{ArrangeReport, ArrangeStatus, MoveKind, MoveRecord};

use crate::config::Config;
use crate::error::{Result, UserFriendlyError};
use crate::scanner::{FolderScanner, NamingRules};
use crate::ui::{LogLevel, LogSink, NullSink};
use std::path::{Path, PathBuf};

const BANNER: &str =
    "============================================ Arrange start ============================================";

/// Sorts the `.asy` sources of one figure folder into `size<N>` subfolders.
pub struct Arranger {
    root: PathBuf,
    rules: NamingRules,
    sink: Box<dyn LogSink>,
    dry_run: bool,
    banner: bool,
}

impl Arranger {
    pub fn new<P: Into<PathBuf>>(root: P, config: &Config) -> Result<Self> {
        Ok(Self {
            root: root.into(),
            rules: NamingRules::new(&config.naming)?,
            sink: Box::new(NullSink),
            dry_run: config.output.dry_run,
            banner: config.output.banner,
        })
    }

    pub fn with_sink<S: LogSink + 'static>(mut self, sink: S) -> Self {
        self.sink = Box::new(sink);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs a full pass. An unavailable root folder is logged and reported
    /// through the returned report's status rather than returned as an error.
    pub fn arrange(&self) -> ArrangeReport {
        match self.try_arrange() {
            Ok(report) => report,
            Err(error) => {
                self.sink.log(LogLevel::Error, &error.user_message());

                let mut report = ArrangeReport::new(&self.root, self.dry_run);
                report.status = ArrangeStatus::FolderUnavailable;
                report.add_error(error.to_string());
                report.finish();
                report
            }
        }
    }

    /// Same pass as [`Arranger::arrange`], but an unavailable root folder is
    /// returned as `ArrangeError::FolderUnavailable` without being logged.
    pub fn try_arrange(&self) -> Result<ArrangeReport> {
        let sink: &dyn LogSink = &*self.sink;
        let mut report = ArrangeReport::new(&self.root, self.dry_run);

        if self.banner {
            sink.println(BANNER);
        }

        let scanner = FolderScanner::new(self.rules.clone());
        let discovery = scanner.discover(&self.root)?;
        sink.log(
            LogLevel::Debug,
            &format!(
                "Found {} source files and {} size folders in {}",
                discovery.source_files.len(),
                discovery.size_folders.len(),
                self.root.display()
            ),
        );

        let categorizer = Categorizer::new(&self.rules, sink);
        let mover = FileMover::new(&self.root, &self.rules, sink).with_dry_run(self.dry_run);

        // Files edited since the last run may no longer match their folder.
        for folder in &discovery.size_folders {
            sink.log(
                LogLevel::Debug,
                &format!("Checking {} (size {})", folder.path.display(), folder.size),
            );
            let files = match scanner.list_source_files(&folder.path) {
                Ok(files) => files,
                Err(error) => {
                    sink.log(
                        LogLevel::Warning,
                        &format!("Skipping folder {}: {}", folder.path.display(), error),
                    );
                    report.add_error(error.to_string());
                    continue;
                }
            };

            let groups = categorizer.categorize(&files, &mut report);
            if !groups.is_empty() {
                mover.move_groups(&groups, &mut report);
            }
        }

        let groups = categorizer.categorize(&discovery.source_files, &mut report);
        mover.move_groups(&groups, &mut report);

        report.finish();
        Ok(report)
    }
}
