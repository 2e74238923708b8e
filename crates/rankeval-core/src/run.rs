//! Ranked result ("run") store and parser.
//!
//! A run file holds the ranked output of a retrieval system. Rank is implied
//! by row order within each query: the first line mentioning a query is its
//! rank-1 document. No score column is consulted and no re-sorting happens;
//! the engine trusts the file's order.
//!
//! # File Format
//!
//! Whitespace-separated columns, one retrieved document per line:
//!
//! ```text
//! <query_id> <iteration> <doc_id> [rank score tag ...]
//! ```
//!
//! Only the first and third columns are read; anything after the document
//! identifier (the rank, score, and tag columns of the common TREC run
//! format) is ignored. Blank lines and lines starting with `#` are skipped.

use crate::error::EvalError;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::info;

/// Minimum fields in a result record.
const RUN_FIELDS: usize = 3;

/// Ranked retrieval results keyed by query.
///
/// Queries are kept in a `BTreeMap` so iteration is always in ascending
/// query-identifier order, which is the order per-query reports are emitted
/// in regardless of the order the file interleaved its queries.
#[derive(Debug, Clone, Default)]
pub struct Run {
    results: BTreeMap<String, Vec<String>>,
}

impl Run {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads ranked results from a file.
    pub fn from_path(path: &Path) -> Result<Self, EvalError> {
        let file = File::open(path).map_err(|source| EvalError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file), path)
    }

    /// Parses ranked results from a buffered reader.
    ///
    /// `path` is used only for error reporting.
    pub fn from_reader<R: BufRead>(reader: R, path: &Path) -> Result<Self, EvalError> {
        let mut results: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut records = 0usize;

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| EvalError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < RUN_FIELDS {
                return Err(EvalError::MalformedRecord {
                    path: path.to_path_buf(),
                    line: line_num + 1,
                    expected: RUN_FIELDS,
                    found: fields.len(),
                    content: line.clone(),
                });
            }

            records += 1;
            let (query_id, doc_id) = (fields[0], fields[2]);
            results
                .entry(query_id.to_string())
                .or_default()
                .push(doc_id.to_string());
        }

        info!(
            "Loaded {} ranked results across {} queries",
            records,
            results.len()
        );

        Ok(Self { results })
    }

    /// Appends a document to a query's ranking.
    ///
    /// Equivalent to parsing one result line; the document lands at the next
    /// rank for that query.
    pub fn add_result(&mut self, query_id: &str, doc_id: &str) {
        self.results
            .entry(query_id.to_string())
            .or_default()
            .push(doc_id.to_string());
    }

    /// Returns the ranking for a query, rank 1 first.
    pub fn ranking(&self, query_id: &str) -> Option<&[String]> {
        self.results.get(query_id).map(Vec::as_slice)
    }

    /// Iterates rankings in ascending query-identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.results
            .iter()
            .map(|(query_id, docs)| (query_id.as_str(), docs.as_slice()))
    }

    /// Number of queries with at least one retrieved document.
    pub fn num_queries(&self) -> usize {
        self.results.len()
    }

    /// Total retrieved documents across all queries.
    pub fn num_results(&self) -> usize {
        self.results.values().map(Vec::len).sum()
    }
}

// ============================================================================
// Tests
// ============================================================================
