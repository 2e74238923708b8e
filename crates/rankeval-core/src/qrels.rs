//! Relevance judgment ("qrels") store and parser.
//!
//! A qrels file records which documents human assessors judged relevant for
//! each query. Grades collapse to binary relevance: any grade other than the
//! literal string `"0"` marks the document relevant, and the magnitude is
//! discarded.
//!
//! # File Format
//!
//! Whitespace-separated columns, one judgment per line:
//!
//! ```text
//! <query_id> <iteration> <doc_id> <grade>
//! ```
//!
//! The iteration column is ignored. Extra trailing columns are ignored.
//! Blank lines and lines starting with `#` are skipped.

use crate::error::EvalError;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Minimum fields in a judgment record.
const QRELS_FIELDS: usize = 4;

/// Binary relevance judgments keyed by query.
///
/// A query appears in the store only if at least one judgment marked a
/// document relevant for it. Queries judged with all-zero grades are treated
/// the same as queries never judged at all: the engine excludes them.
#[derive(Debug, Clone, Default)]
pub struct Qrels {
    judgments: HashMap<String, HashSet<String>>,
}

impl Qrels {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads judgments from a file.
    pub fn from_path(path: &Path) -> Result<Self, EvalError> {
        let file = File::open(path).map_err(|source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parses judgments from a buffered reader.
    ///
    /// `path` is used only for error reporting.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self, EvalError> {
        let mut judgments: HashMap<String, HashSet<String>> = HashMap::new();
        let mut records = 0usize;
        let mut relevant = 0usize;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| EvalError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < QRELS_FIELDS {
                return Err(EvalError::MalformedRecord {
                    path: path.to_path_buf(),
                    line: line_num + 1,
                    expected: QRELS_FIELDS,
                    found: fields.len(),
                    content: line.clone(),
                });
            }

            records += 1;
            let (query_id, doc_id, grade) = (fields[0], fields[2], fields[3]);
            if grade != "0" {
                relevant += 1;
                judgments
                    .entry(query_id.to_string())
                    .or_default()
                    .insert(doc_id.to_string());
            }
        }

        info!(
            "Loaded {} judgments: {} relevant across {} queries",
            records,
            relevant,
            judgments.len()
        );

        Ok(Self { judgments })
    }

    /// Records a single relevant document for a query.
    ///
    /// Equivalent to parsing one judgment line with a non-zero grade.
    pub fn add_relevant(&mut self, query_id: &str, doc_id: &str) {
        self.judgments
            .entry(query_id.to_string())
            .or_default()
            .insert(doc_id.to_string());
    }

    /// Returns the relevant documents for a query, if any were judged relevant.
    pub fn relevant_docs(&self, query_id: &str) -> Option<&HashSet<String>> {
        self.judgments.get(query_id)
    }

    /// Number of queries with at least one relevant document.
    pub fn num_queries(&self) -> usize {
        self.judgments.len()
    }

    /// Total relevant documents across all queries.
    pub fn num_relevant(&self) -> usize {
        self.judgments.values().map(HashSet::len).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_qrels(contents: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("judgments.qrel");
        let mut file = File::create(&path).unwrap();
        write!(file, "{}", contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_load_basic_qrels() {
        let (_dir, path) = write_qrels(
            "301 0 FBIS3-10082 1\n\
             301 0 FBIS3-10169 0\n\
             301 0 FBIS3-10243 2\n\
             302 0 FBIS3-20101 1\n",
        );
        let qrels = Qrels::from_path(&path).unwrap();

        assert_eq!(qrels.num_queries(), 2);
        assert_eq!(qrels.num_relevant(), 3);

        let docs = qrels.relevant_docs("301").unwrap();
        assert!(docs.contains("FBIS3-10082"));
        assert!(docs.contains("FBIS3-10243"));
        // Grade "0" must not mark the document relevant
        assert!(!docs.contains("FBIS3-10169"));
    }

    #[test]
    fn test_all_zero_grades_leave_query_absent() {
        let (_dir, path) = write_qrels("301 0 FBIS3-10169 0\n");
        let qrels = Qrels::from_path(&path).unwrap();

        assert_eq!(qrels.num_queries(), 0);
        assert!(qrels.relevant_docs("301").is_none());
    }

    #[test]
    fn test_blank_and_comment_lines_skipped() {
        let (_dir, path) = write_qrels(
            "# assessor pool A\n\
             \n\
             301 0 d1 1\n\
             \n\
             # second batch\n\
             302 0 d2 1\n",
        );
        let qrels = Qrels::from_path(&path).unwrap();
        assert_eq!(qrels.num_queries(), 2);
    }

    #[test]
    fn test_malformed_line_reports_location() {
        let (_dir, path) = write_qrels(
            "301 0 d1 1\n\
             301 d2\n",
        );
        let err = Qrels::from_path(&path).unwrap_err();

        match err {
            EvalError::MalformedRecord {
                line,
                expected,
                found,
                content,
                ..
            } => {
                assert_eq!(line, 2);
                assert_eq!(expected, QRELS_FIELDS);
                assert_eq!(found, 2);
                assert_eq!(content, "301 d2");
            }
            other => panic!("Expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let result = Qrels::from_path(&dir.path().join("absent.qrel"));
        assert!(matches!(result, Err(EvalError::Io { .. })));
    }

    #[test]
    fn test_nonzero_string_grades_count_as_relevant() {
        // The grade is compared as a string, so "0.0" and "00" are relevant
        let (_dir, path) = write_qrels(
            "301 0 d1 0.0\n\
             301 0 d2 00\n\
             301 0 d3 0\n",
        );
        let qrels = Qrels::from_path(&path).unwrap();
        let docs = qrels.relevant_docs("301").unwrap();
        assert_eq!(docs.len(), 2);
        assert!(!docs.contains("d3"));
    }

    #[test]
    fn test_add_relevant_matches_parser() {
        let mut qrels = Qrels::new();
        qrels.add_relevant("q1", "d1");
        qrels.add_relevant("q1", "d1");
        qrels.add_relevant("q1", "d2");

        assert_eq!(qrels.num_queries(), 1);
        assert_eq!(qrels.num_relevant(), 2);
    }
}
