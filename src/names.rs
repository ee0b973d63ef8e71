use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::NameSourceError;

const UTF8_BOM: &str = "\u{feff}";

/// What to do with a name longer than the configured character limit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlongPolicy {
    /// Keep the first `max_entry_chars` characters
    #[default]
    Truncate,
    /// Drop the whole line
    Skip,
}

/// Capacity bounds applied while loading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameLimits {
    pub max_entries: usize,
    pub max_entry_chars: usize,
    pub overlong: OverlongPolicy,
}

impl Default for NameLimits {
    fn default() -> Self {
        Self {
            max_entries: 100_000,
            max_entry_chars: 100,
            overlong: OverlongPolicy::Truncate,
        }
    }
}

/// Ordered list of candidate names, in file order. Immutable once loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameList(Vec<String>);

/// Everything that was degraded during a load
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Set when the source could not be opened or a read failed part way
    pub source_error: Option<NameSourceError>,
    /// Lines dropped because they were not valid UTF-8
    pub skipped: Vec<NameSourceError>,
    pub truncated: usize,
    pub dropped_overlong: usize,
    /// Loading stopped at `max_entries` with names left unread
    pub capacity_reached: bool,
}

impl NameList {
    /// Load names from a file. A missing or unreadable file gives an empty list.
    pub fn load<P: AsRef<Path>>(path: P, limits: &NameLimits) -> Self {
        Self::load_with_report(path, limits).0
    }

    pub fn load_with_report<P: AsRef<Path>>(path: P, limits: &NameLimits) -> (Self, LoadReport) {
        let path = path.as_ref();
        let (names, report) = match File::open(path) {
            Ok(file) => {
                let (names, mut report) = Self::from_reader(BufReader::new(file), limits);
                // A reader has no path of its own
                if let Some(NameSourceError::SourceUnavailable { path: source_path, .. }) =
                    report.source_error.as_mut()
                {
                    *source_path = path.to_path_buf();
                }
                (names, report)
            }
            Err(source) => {
                let report = LoadReport {
                    source_error: Some(NameSourceError::SourceUnavailable {
                        path: path.to_path_buf(),
                        source,
                    }),
                    ..LoadReport::default()
                };
                (Self::default(), report)
            }
        };

        if let Some(err) = &report.source_error {
            log::warn!("{}", err);
        }
        log::info!("Loaded {} names from {}", names.len(), path.display());
        (names, report)
    }

    /// Parse names from any line source.
    ///
    /// - Trailing `\n` / `\r\n` is stripped and surrounding whitespace trimmed
    /// - Blank lines are ignored
    /// - Lines that are not valid UTF-8 are skipped
    pub fn from_reader<R: BufRead>(mut reader: R, limits: &NameLimits) -> (Self, LoadReport) {
        let mut names = Vec::new();
        let mut report = LoadReport::default();
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(source) => {
                    report.source_error = Some(NameSourceError::SourceUnavailable {
                        path: Default::default(),
                        source,
                    });
                    break;
                }
            }
            line_no += 1;

            let line = match String::from_utf8(std::mem::take(&mut buf)) {
                Ok(line) => line,
                Err(source) => {
                    let err = NameSourceError::DecodeSkipped {
                        line: line_no,
                        source,
                    };
                    log::debug!("{}", err);
                    report.skipped.push(err);
                    continue;
                }
            };

            let mut name = line.trim_end_matches(['\n', '\r']);
            if line_no == 1 {
                name = name.strip_prefix(UTF8_BOM).unwrap_or(name);
            }
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            let overlong = name.chars().count() > limits.max_entry_chars;
            if overlong && limits.overlong == OverlongPolicy::Skip {
                log::debug!(
                    "Line {} exceeds {} characters, skipped",
                    line_no,
                    limits.max_entry_chars
                );
                report.dropped_overlong += 1;
                continue;
            }

            if names.len() >= limits.max_entries {
                report.capacity_reached = true;
                break;
            }

            if overlong {
                report.truncated += 1;
                let cut: String = name.chars().take(limits.max_entry_chars).collect();
                // The cut can land on inner whitespace
                names.push(cut.trim_end().to_string());
            } else {
                names.push(name.to_string());
            }
        }

        (Self(names), report)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for NameList {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.source_error.is_none()
            && self.skipped.is_empty()
            && self.truncated == 0
            && self.dropped_overlong == 0
            && !self.capacity_reached
    }

    /// One-line description for the status area, `None` when nothing went wrong
    pub fn summary(&self) -> Option<String> {
        if self.is_clean() {
            return None;
        }

        let mut parts = Vec::new();
        if let Some(err) = &self.source_error {
            parts.push(err.to_string());
        }
        if !self.skipped.is_empty() {
            parts.push(format!("{} undecodable line(s) skipped", self.skipped.len()));
        }
        if self.truncated > 0 {
            parts.push(format!("{} long name(s) truncated", self.truncated));
        }
        if self.dropped_overlong > 0 {
            parts.push(format!("{} long name(s) skipped", self.dropped_overlong));
        }
        if self.capacity_reached {
            parts.push("name limit reached, remaining lines ignored".to_string());
        }
        Some(parts.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn parse(bytes: &[u8], limits: &NameLimits) -> (NameList, LoadReport) {
        NameList::from_reader(Cursor::new(bytes.to_vec()), limits)
    }

    fn names(list: &NameList) -> Vec<&str> {
        list.iter().collect()
    }

    #[test]
    fn test_load_three_names_in_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Alice\nBob\nCharlie\n").unwrap();

        let list = NameList::load(file.path(), &NameLimits::default());
        assert_eq!(list.len(), 3);
        assert_eq!(names(&list), vec!["Alice", "Bob", "Charlie"]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (list, report) =
            NameList::load_with_report(dir.path().join("names.txt"), &NameLimits::default());

        assert!(list.is_empty());
        assert!(matches!(
            report.source_error,
            Some(NameSourceError::SourceUnavailable { .. })
        ));
        assert!(report.summary().is_some());
    }

    #[test]
    fn test_crlf_and_blank_lines() {
        let (list, report) = parse(b"Alice\r\n\r\n  \nBob\r\n\n", &NameLimits::default());
        assert_eq!(names(&list), vec!["Alice", "Bob"]);
        assert!(report.is_clean());
    }

    #[test]
    fn test_last_line_without_newline() {
        let (list, _) = parse(b"Alice\nBob", &NameLimits::default());
        assert_eq!(names(&list), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_multibyte_names_and_bom() {
        let input = "\u{feff}张三\n李四\nJosé\n".as_bytes();
        let (list, _) = parse(input, &NameLimits::default());
        assert_eq!(names(&list), vec!["张三", "李四", "José"]);
    }

    #[test]
    fn test_invalid_utf8_line_skipped() {
        let mut input = b"Alice\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'x', b'\n']);
        input.extend_from_slice(b"Bob\n");

        let (list, report) = parse(&input, &NameLimits::default());
        assert_eq!(names(&list), vec!["Alice", "Bob"]);
        assert_eq!(report.skipped.len(), 1);
        assert!(matches!(
            report.skipped[0],
            NameSourceError::DecodeSkipped { line: 2, .. }
        ));
    }

    #[test]
    fn test_duplicates_kept() {
        let (list, _) = parse(b"Ann\nAnn\nBen\n", &NameLimits::default());
        assert_eq!(names(&list), vec!["Ann", "Ann", "Ben"]);
    }

    #[test]
    fn test_stops_at_max_entries() {
        let limits = NameLimits {
            max_entries: 2,
            ..NameLimits::default()
        };
        let (list, report) = parse(b"A\nB\nC\nD\n", &limits);
        assert_eq!(names(&list), vec!["A", "B"]);
        assert!(report.capacity_reached);
    }

    #[test]
    fn test_exactly_max_entries_is_not_capped() {
        let limits = NameLimits {
            max_entries: 2,
            ..NameLimits::default()
        };
        let (list, report) = parse(b"A\nB\n\n", &limits);
        assert_eq!(list.len(), 2);
        assert!(!report.capacity_reached);
    }

    #[test]
    fn test_overlong_truncated_by_characters() {
        let limits = NameLimits {
            max_entry_chars: 3,
            ..NameLimits::default()
        };
        let (list, report) = parse("Abc\n欧阳娜娜\nAbcdef\n".as_bytes(), &limits);
        assert_eq!(names(&list), vec!["Abc", "欧阳娜", "Abc"]);
        assert_eq!(report.truncated, 2);
    }

    #[test]
    fn test_overlong_skipped() {
        let limits = NameLimits {
            max_entry_chars: 3,
            overlong: OverlongPolicy::Skip,
            ..NameLimits::default()
        };
        let (list, report) = parse(b"Abc\nAbcd\nXy\n", &limits);
        assert_eq!(names(&list), vec!["Abc", "Xy"]);
        assert_eq!(report.dropped_overlong, 1);
    }

    #[test]
    fn test_read_failure_reports_real_path() {
        // Opening a directory works on Unix but reading it fails
        let dir = tempfile::tempdir().unwrap();
        let (list, report) = NameList::load_with_report(dir.path(), &NameLimits::default());

        assert!(list.is_empty());
        match &report.source_error {
            Some(NameSourceError::SourceUnavailable { path, .. }) => assert_eq!(path, dir.path()),
            other => panic!("expected SourceUnavailable, got {:?}", other),
        }
        let summary = report.summary().unwrap();
        assert!(summary.contains(&dir.path().display().to_string()));
    }

    #[test]
    fn test_truncation_drops_trailing_whitespace() {
        let limits = NameLimits {
            max_entry_chars: 4,
            ..NameLimits::default()
        };
        let (list, report) = parse(b"Abc def\nAb  cd\n", &limits);
        assert_eq!(names(&list), vec!["Abc", "Ab"]);
        assert_eq!(report.truncated, 2);
    }

    #[test]
    fn test_skipped_overlong_after_full_list_is_not_capacity() {
        let limits = NameLimits {
            max_entries: 2,
            max_entry_chars: 3,
            overlong: OverlongPolicy::Skip,
        };
        let (list, report) = parse(b"Ann\nBen\nLongname\nAnother\n", &limits);
        assert_eq!(names(&list), vec!["Ann", "Ben"]);
        assert!(!report.capacity_reached);
        assert_eq!(report.dropped_overlong, 2);

        // A name that would have been kept still trips the limit
        let (_, report) = parse(b"Ann\nBen\nLongname\nCy\n", &limits);
        assert!(report.capacity_reached);
    }
}
