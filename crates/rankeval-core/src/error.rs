//! Error types for rankeval-core.
//!
//! This module defines the errors surfaced by the input parsers and the
//! corpus aggregator. Per-query arithmetic edge cases (empty rankings, empty
//! relevance sets) are not errors; they degrade to defined zero scores inside
//! the metric computations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading input files or aggregating results.
#[derive(Debug, Error)]
pub enum EvalError {
    /// Failed to open or read an input file
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The file that could not be read
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// An input line did not split into enough fields
    #[error("Malformed record at {path}:{line}: expected at least {expected} fields, found {found} in {content:?}")]
    MalformedRecord {
        /// The file containing the bad record
        path: PathBuf,
        /// 1-based line number of the bad record
        line: usize,
        /// Minimum number of fields the format requires
        expected: usize,
        /// Number of fields the line actually had
        found: usize,
        /// The offending line, verbatim
        content: String,
    },
    /// Every query in the run was missing from the judgments
    #[error("No queries evaluated: no query in the run has relevance judgments")]
    NoQueriesEvaluated,
}
