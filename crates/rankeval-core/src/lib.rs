//! # Rankeval Core
//!
//! Library for scoring ranked retrieval runs against human relevance judgments.
//!
//! This crate provides the parsing and metric-computation machinery used by the
//! `rankeval` command-line tool: it reads TREC-style qrels and run files, scores
//! every judged query with the standard ad-hoc retrieval metrics, and averages
//! the scores across the run.
//!
//! ## Modules
//!
//! - [`qrels`] - Relevance judgment store and file parser
//! - [`run`] - Ranked result store and file parser
//! - [`evaluation`] - Per-query metrics, corpus aggregation, and the evaluation engine
//! - [`config`] - Default cutoff configuration
//! - [`error`] - Error types for parsing and aggregation

pub mod config;
pub mod error;
pub mod evaluation;
pub mod qrels;
pub mod run;
