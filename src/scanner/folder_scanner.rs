use crate::error::{ArrangeError, Result};
use crate::scanner::naming::{NamingRules, SizeToken};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub path: PathBuf,
    /// Display form of the file name; moves use the name held in `path`.
    pub filename: String,
}

impl CandidateFile {
    pub fn new(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self { path, filename }
    }

    pub fn parent(&self) -> Option<&Path> {
        self.path.parent()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeFolder {
    pub path: PathBuf,
    pub size: SizeToken,
}

/// Immediate children of the root, split into loose sources and size folders.
#[derive(Debug, Default)]
pub struct Discovery {
    pub source_files: Vec<CandidateFile>,
    pub size_folders: Vec<SizeFolder>,
}

pub struct FolderScanner {
    rules: NamingRules,
}

impl FolderScanner {
    pub fn new(rules: NamingRules) -> Self {
        Self { rules }
    }

    /// Lists the root and partitions it. A root that is missing, unreadable
    /// or has no children at all is `FolderUnavailable`.
    pub fn discover<P: AsRef<Path>>(&self, root: P) -> Result<Discovery> {
        let root = root.as_ref();
        let unavailable = || ArrangeError::FolderUnavailable {
            path: root.to_path_buf(),
        };

        let entries = self.list_children(root).ok_or_else(unavailable)?;
        if entries.is_empty() {
            return Err(unavailable());
        }

        let mut discovery = Discovery::default();
        for entry in entries {
            let name = entry.file_name().to_string_lossy();
            let file_type = entry.file_type();

            if file_type.is_file() && self.rules.is_source_name(&name) {
                discovery
                    .source_files
                    .push(CandidateFile::new(entry.path().to_path_buf()));
            } else if file_type.is_dir() {
                if let Some(size) = self.rules.size_folder_token(&name) {
                    discovery.size_folders.push(SizeFolder {
                        path: entry.path().to_path_buf(),
                        size,
                    });
                }
            }
        }

        Ok(discovery)
    }

    /// Source files directly inside `folder`.
    pub fn list_source_files<P: AsRef<Path>>(&self, folder: P) -> Result<Vec<CandidateFile>> {
        let folder = folder.as_ref();
        let entries = self
            .list_children(folder)
            .ok_or_else(|| ArrangeError::FolderUnavailable {
                path: folder.to_path_buf(),
            })?;

        Ok(entries
            .into_iter()
            .filter(|e| e.file_type().is_file())
            .filter(|e| self.rules.is_source_name(&e.file_name().to_string_lossy()))
            .map(|e| CandidateFile::new(e.path().to_path_buf()))
            .collect())
    }

    /// `None` when the directory itself cannot be read. Symlinks are followed,
    /// so linked sources and size folders count by their target's type.
    /// Unreadable children and dangling links are dropped.
    fn list_children(&self, dir: &Path) -> Option<Vec<DirEntry>> {
        if !dir.is_dir() {
            return None;
        }

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        let mut entries = Vec::new();
        for entry in walker {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(err) if err.depth() == 0 => return None,
                Err(_) => continue,
            }
        }

        Some(entries)
    }
}
