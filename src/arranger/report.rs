use crate::scanner::SizeToken;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrangeStatus {
    Completed,
    FolderUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    Source,
    Artifact,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoveRecord {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub size: SizeToken,
    pub kind: MoveKind,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArrangeReport {
    pub root: PathBuf,
    pub status: ArrangeStatus,
    pub dry_run: bool,
    pub moved: Vec<MoveRecord>,
    pub unchanged: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub unreadable: Vec<PathBuf>,
    pub folders_created: Vec<PathBuf>,
    pub errors: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    #[serde(skip)]
    timer: Instant,
}

impl ArrangeReport {
    pub fn new<P: AsRef<Path>>(root: P, dry_run: bool) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            status: ArrangeStatus::Completed,
            dry_run,
            moved: Vec::new(),
            unchanged: Vec::new(),
            skipped: Vec::new(),
            unreadable: Vec::new(),
            folders_created: Vec::new(),
            errors: Vec::new(),
            started_at: Utc::now(),
            duration: Duration::ZERO,
            timer: Instant::now(),
        }
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    pub fn finish(&mut self) {
        self.duration = self.timer.elapsed();
    }

    pub fn source_moves(&self) -> usize {
        self.moved.iter().filter(|m| m.kind == MoveKind::Source).count()
    }

    pub fn artifact_moves(&self) -> usize {
        self.moved.iter().filter(|m| m.kind == MoveKind::Artifact).count()
    }

    pub fn destination_of(&self, source: &Path) -> Option<&Path> {
        self.moved
            .iter()
            .find(|m| m.source == source)
            .map(|m| m.destination.as_path())
    }

    pub fn is_available(&self) -> bool {
        self.status == ArrangeStatus::Completed
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
