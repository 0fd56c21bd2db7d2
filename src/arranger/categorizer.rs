use crate::arranger::report::ArrangeReport;
use crate::error::{ArrangeError, Result, UserFriendlyError};
use crate::scanner::{CandidateFile, NamingRules, SizeToken};
use crate::ui::{LogLevel, LogSink};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Source files grouped by their declared size, in token order.
#[derive(Debug, Default, Clone)]
pub struct SizeGroups {
    groups: BTreeMap<SizeToken, Vec<CandidateFile>>,
}

impl SizeGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, size: SizeToken, file: CandidateFile) {
        self.groups.entry(size).or_default().push(file);
    }

    pub fn get(&self, size: &SizeToken) -> Option<&[CandidateFile]> {
        self.groups.get(size).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SizeToken, &[CandidateFile])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }
}

pub struct Categorizer<'a> {
    rules: &'a NamingRules,
    sink: &'a dyn LogSink,
}

impl<'a> Categorizer<'a> {
    pub fn new(rules: &'a NamingRules, sink: &'a dyn LogSink) -> Self {
        Self { rules, sink }
    }

    /// Groups `files` by size. Files without a size line or that cannot be
    /// read are logged, recorded on `report` and left out.
    pub fn categorize(&self, files: &[CandidateFile], report: &mut ArrangeReport) -> SizeGroups {
        let mut groups = SizeGroups::new();

        for file in files {
            match self.read_size_token(&file.path) {
                Ok(Some(size)) => {
                    self.sink.log(
                        LogLevel::Debug,
                        &format!("{} declares size {}", file.path.display(), size),
                    );
                    groups.insert(size, file.clone());
                }
                Ok(None) => {
                    let skip = ArrangeError::NoSizeDeclared {
                        path: file.path.clone(),
                    };
                    self.sink.log(LogLevel::Warning, &skip.user_message());
                    report.skipped.push(file.path.clone());
                }
                Err(error) => {
                    self.sink.log(LogLevel::Error, &error.user_message());
                    self.sink.log(LogLevel::Debug, &format!("{:#?}", error));
                    report.unreadable.push(file.path.clone());
                    report.add_error(error.to_string());
                }
            }
        }

        groups
    }

    /// First matching size line wins; the rest of the file is not read.
    /// Lines end at `\n`, `\r\n` or a bare `\r`.
    pub fn read_size_token(&self, path: &Path) -> Result<Option<SizeToken>> {
        let unreadable = |source| ArrangeError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(unreadable)?;
        let mut reader = BufReader::new(file);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(unreadable)?;
            if read == 0 {
                return Ok(None);
            }

            let chunk = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
            for line in chunk.split(|&b| b == b'\r') {
                if let Some(size) = self.rules.parse_size_line(&String::from_utf8_lossy(line)) {
                    return Ok(Some(size));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NamingConfig;
    use crate::ui::MemorySink;
    use std::fs;
    use tempfile::TempDir;

    fn rules() -> NamingRules {
        NamingRules::new(&NamingConfig::default()).unwrap()
    }

    fn write_source(dir: &Path, name: &str, content: &str) -> CandidateFile {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        CandidateFile::new(path)
    }

    #[test]
    fn test_groups_by_declared_size() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let files = vec![
            write_source(dir, "a.asy", "import graph;\nsize(5);\ndraw(unitcircle);\n"),
            write_source(dir, "b.asy", "size(12);\n"),
            write_source(dir, "c.asy", "size(5);"),
        ];

        let rules = rules();
        let sink = MemorySink::new();
        let mut report = ArrangeReport::new(dir, false);
        let groups = Categorizer::new(&rules, &sink).categorize(&files, &mut report);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups.file_count(), 3);

        let five: Vec<_> = groups
            .get(&SizeToken::new("5"))
            .unwrap()
            .iter()
            .map(|f| f.filename.as_str())
            .collect();
        assert_eq!(five, vec!["a.asy", "c.asy"]);
        assert_eq!(groups.get(&SizeToken::new("12")).unwrap().len(), 1);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_first_match_wins() {
        let temp_dir = TempDir::new().unwrap();
        let file = write_source(temp_dir.path(), "a.asy", "size(3);\nsize(4);\n");

        let rules = rules();
        let categorizer = Categorizer::new(&rules, &crate::ui::NullSink);
        assert_eq!(
            categorizer.read_size_token(&file.path).unwrap(),
            Some(SizeToken::new("3"))
        );
    }

    #[test]
    fn test_indented_and_crlf_lines() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let indented = write_source(dir, "a.asy", "  size(3);\nsize(3); // wide\n");
        let crlf = write_source(dir, "b.asy", "import three;\r\nsize(8);\r\n");

        let rules = rules();
        let categorizer = Categorizer::new(&rules, &crate::ui::NullSink);
        assert_eq!(categorizer.read_size_token(&indented.path).unwrap(), None);
        assert_eq!(
            categorizer.read_size_token(&crlf.path).unwrap(),
            Some(SizeToken::new("8"))
        );
    }

    #[test]
    fn test_carriage_return_only_lines() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let mac = write_source(dir, "mac.asy", "import graph;\rsize(5);\rdraw(unitcircle);\r");
        let glued = write_source(dir, "glued.asy", "import graph;\rsize(5); draw(unitcircle);\r");

        let rules = rules();
        let categorizer = Categorizer::new(&rules, &crate::ui::NullSink);
        assert_eq!(
            categorizer.read_size_token(&mac.path).unwrap(),
            Some(SizeToken::new("5"))
        );
        assert_eq!(categorizer.read_size_token(&glued.path).unwrap(), None);
    }

    #[test]
    fn test_invalid_utf8_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.asy");
        fs::write(&path, b"label(\"caf\xe9\");\nsize(6);\n").unwrap();

        let rules = rules();
        let categorizer = Categorizer::new(&rules, &crate::ui::NullSink);
        assert_eq!(
            categorizer.read_size_token(&path).unwrap(),
            Some(SizeToken::new("6"))
        );
    }

    #[test]
    fn test_missing_size_is_skipped_and_logged() {
        let temp_dir = TempDir::new().unwrap();
        let files = vec![write_source(temp_dir.path(), "plain.asy", "draw((0,0)--(1,1));\n")];

        let rules = rules();
        let sink = MemorySink::new();
        let mut report = ArrangeReport::new(temp_dir.path(), false);
        let groups = Categorizer::new(&rules, &sink).categorize(&files, &mut report);

        assert!(groups.is_empty());
        assert_eq!(report.skipped, vec![files[0].path.clone()]);
        assert!(sink.contains("does not contain size information"));
        assert!(!report.has_errors());
    }

    #[test]
    fn test_unreadable_file_is_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path();
        let missing = CandidateFile::new(dir.join("gone.asy"));
        let present = write_source(dir, "here.asy", "size(2);\n");

        let rules = rules();
        let sink = MemorySink::new();
        let mut report = ArrangeReport::new(dir, false);
        let groups =
            Categorizer::new(&rules, &sink).categorize(&[missing.clone(), present], &mut report);

        assert_eq!(groups.file_count(), 1);
        assert_eq!(report.unreadable, vec![missing.path]);
        assert_eq!(sink.lines_at(LogLevel::Error).len(), 1);
        assert!(sink.lines_at(LogLevel::Debug).iter().any(|l| l.contains("FileUnreadable")));
    }
}
