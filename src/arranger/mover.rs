use crate::arranger::categorizer::SizeGroups;
use crate::arranger::report::{ArrangeReport, MoveKind, MoveRecord};
use crate::error::{ArrangeError, Result, UserFriendlyError};
use crate::scanner::{CandidateFile, NamingRules, SizeToken};
use crate::ui::{LogLevel, LogSink};
use std::fs;
use std::io;
use std::path::Path;

pub struct FileMover<'a> {
    root: &'a Path,
    rules: &'a NamingRules,
    sink: &'a dyn LogSink,
    dry_run: bool,
}

impl<'a> FileMover<'a> {
    pub fn new(root: &'a Path, rules: &'a NamingRules, sink: &'a dyn LogSink) -> Self {
        Self {
            root,
            rules,
            sink,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Moves every grouped file, and its rendered output when present, into
    /// the folder for its size. Failures are logged and recorded; nothing
    /// already moved is rolled back.
    pub fn move_groups(&self, groups: &SizeGroups, report: &mut ArrangeReport) {
        for (size, files) in groups.iter() {
            let target = self.rules.target_folder(self.root, size);
            self.ensure_folder(&target, report);

            for file in files {
                self.move_file(file, size, &target, report);
            }
        }
    }

    fn ensure_folder(&self, target: &Path, report: &mut ArrangeReport) {
        if target.exists() {
            return;
        }

        if self.dry_run {
            if report.folders_created.iter().any(|f| f == target) {
                return;
            }
            self.sink.log(
                LogLevel::Info,
                &format!("Would create folder: {}", target.display()),
            );
            report.folders_created.push(target.to_path_buf());
            return;
        }

        // Single level; the root itself is known to exist.
        match fs::create_dir(target) {
            Ok(()) => {
                self.sink.log(
                    LogLevel::Debug,
                    &format!("Created folder: {}", target.display()),
                );
                report.folders_created.push(target.to_path_buf());
            }
            Err(e) => {
                let message = format!("Failed to create folder {}: {}", target.display(), e);
                self.sink.log(LogLevel::Error, &message);
                report.add_error(message);
            }
        }
    }

    fn move_file(
        &self,
        file: &CandidateFile,
        size: &SizeToken,
        target: &Path,
        report: &mut ArrangeReport,
    ) {
        if file.parent() == Some(target) {
            self.sink.log(
                LogLevel::Debug,
                &format!("{} is already in {}", file.filename, target.display()),
            );
            report.unchanged.push(file.path.clone());
            return;
        }

        let destination = match file.path.file_name() {
            Some(name) => target.join(name),
            None => return,
        };
        match self.relocate(&file.path, &destination, report) {
            Ok(()) => {
                self.log_moved(&file.filename, target);
                report.moved.push(MoveRecord {
                    source: file.path.clone(),
                    destination,
                    size: size.clone(),
                    kind: MoveKind::Source,
                });
            }
            Err(error) => {
                self.sink.log(LogLevel::Error, &error.user_message());
                self.sink.log(LogLevel::Debug, &error.to_string());
                report.add_error(error.to_string());
            }
        }

        // Attempted even when the source move failed.
        if let Some(artifact) = self.rules.artifact_path(&file.path) {
            if artifact.is_file() {
                self.move_artifact(&artifact, size, target, report);
            }
        }
    }

    /// Only success is logged at normal verbosity for rendered outputs.
    fn move_artifact(
        &self,
        artifact: &Path,
        size: &SizeToken,
        target: &Path,
        report: &mut ArrangeReport,
    ) {
        let name = match artifact.file_name() {
            Some(name) => name,
            None => return,
        };
        let destination = target.join(name);

        match self.relocate(artifact, &destination, report) {
            Ok(()) => {
                self.log_moved(&name.to_string_lossy(), target);
                report.moved.push(MoveRecord {
                    source: artifact.to_path_buf(),
                    destination,
                    size: size.clone(),
                    kind: MoveKind::Artifact,
                });
            }
            Err(error) => {
                self.sink.log(LogLevel::Debug, &error.to_string());
                report.add_error(error.to_string());
            }
        }
    }

    fn log_moved(&self, name: &str, target: &Path) {
        let verb = if self.dry_run { "Would move" } else { "Moved" };
        self.sink.log(
            LogLevel::Success,
            &format!("{} file: {} to: {}", verb, name, target.display()),
        );
    }

    /// Never overwrites an existing destination.
    fn relocate(&self, from: &Path, to: &Path, report: &ArrangeReport) -> Result<()> {
        let failed = |source: io::Error| ArrangeError::MoveFailed {
            path: from.to_path_buf(),
            destination: to.to_path_buf(),
            source,
        };

        if self.destination_taken(to, report) {
            return Err(failed(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "destination already exists",
            )));
        }

        if self.dry_run {
            return Ok(());
        }

        fs::rename(from, to).map_err(failed)
    }

    /// In a dry run the disk is unchanged, so moves already planned in
    /// `report` decide which paths are occupied or vacated.
    fn destination_taken(&self, to: &Path, report: &ArrangeReport) -> bool {
        if self.dry_run {
            if report.moved.iter().any(|m| m.destination == to) {
                return true;
            }
            if report.moved.iter().any(|m| m.source == to) {
                return false;
            }
        }

        fs::symlink_metadata(to).is_ok()
    }
}
