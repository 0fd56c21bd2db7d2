use crate::config::NamingConfig;
use crate::error::Result;
use regex::Regex;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Digit string captured from a `size(<digits>);` line. Kept verbatim, so
/// `size(05);` and `size(5);` land in different folders.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct SizeToken(String);

impl SizeToken {
    pub fn new<S: Into<String>>(digits: S) -> Self {
        Self(digits.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SizeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// File naming convention shared by discovery, categorizing and moving.
#[derive(Debug, Clone)]
pub struct NamingRules {
    source_suffix: String,
    source_extension: String,
    artifact_extension: String,
    folder_prefix: String,
    folder_pattern: Regex,
    size_line_pattern: Regex,
}

impl NamingRules {
    pub fn new(config: &NamingConfig) -> Result<Self> {
        let folder_pattern = Regex::new(&format!(
            r"^{}([0-9]+)$",
            regex::escape(&config.folder_prefix)
        ))?;
        let size_line_pattern = Regex::new(r"^size\(([0-9]+)\);$")?;

        Ok(Self {
            source_suffix: format!(".{}", config.source_extension),
            source_extension: config.source_extension.clone(),
            artifact_extension: config.artifact_extension.clone(),
            folder_prefix: config.folder_prefix.clone(),
            folder_pattern,
            size_line_pattern,
        })
    }

    /// Case-sensitive suffix check on the file name.
    pub fn is_source_name(&self, name: &str) -> bool {
        name.ends_with(&self.source_suffix)
    }

    pub fn size_folder_token(&self, name: &str) -> Option<SizeToken> {
        self.folder_pattern
            .captures(name)
            .and_then(|caps| caps.get(1))
            .map(|m| SizeToken::new(m.as_str()))
    }

    /// Matches a whole line; surrounding whitespace or other content rejects it.
    pub fn parse_size_line(&self, line: &str) -> Option<SizeToken> {
        self.size_line_pattern
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| SizeToken::new(m.as_str()))
    }

    pub fn folder_name(&self, size: &SizeToken) -> String {
        format!("{}{}", self.folder_prefix, size)
    }

    pub fn target_folder(&self, root: &Path, size: &SizeToken) -> PathBuf {
        root.join(self.folder_name(size))
    }

    /// Swaps the trailing source extension of `source` for the artifact one.
    /// Works on the raw file name, so names that are not UTF-8 keep their bytes.
    pub fn artifact_path(&self, source: &Path) -> Option<PathBuf> {
        let name = source.file_name()?;
        if name == OsStr::new(&self.source_suffix) {
            return Some(source.with_file_name(format!(".{}", self.artifact_extension)));
        }

        if source.extension()? != OsStr::new(&self.source_extension) {
            return None;
        }
        Some(source.with_extension(&self.artifact_extension))
    }
}
