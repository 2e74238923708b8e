//! Evaluation framework for measuring retrieval quality.
//!
//! This module scores ranked retrieval results against binary relevance
//! judgments using standard Information Retrieval (IR) metrics, then
//! averages the per-query scores into corpus-level aggregates.
//!
//! # Overview
//!
//! Evaluation is a single pass over a [`Run`](crate::run::Run): each query
//! that has judgments in the [`Qrels`](crate::qrels::Qrels) is scored with
//! [`evaluate_query`], folded into a [`CorpusAccumulator`], and reported in
//! an [`Evaluation`]. Queries without judgments are excluded from every
//! count and mean.
//!
//! Rank positions come from row order in the run file. Each query's
//! precision-recall curve is extended past the end of its ranking out to
//! the largest requested cutoff, so @k metrics are defined even when a
//! system returns fewer than k documents.
//!
//! # Example
//!
//! ```ignore
//! use rankeval_core::evaluation::evaluate;
//! use rankeval_core::qrels::Qrels;
//! use rankeval_core::run::Run;
//! use std::path::Path;
//!
//! let qrels = Qrels::from_path(Path::new("qrels.txt"))?;
//! let run = Run::from_path(Path::new("run.txt"))?;
//!
//! let evaluation = evaluate(&qrels, &run, &[5, 10, 20, 50, 100])?;
//! println!("MAP: {:.4}", evaluation.aggregate.mean_average_precision);
//! ```
//!
//! # Metrics Reference
//!
//! | Metric | Description | Use Case |
//! |--------|-------------|----------|
//! | AP | Average Precision | Overall precision-recall tradeoff per query |
//! | R-Precision | Precision at rank R (R = relevant count) | Query-adaptive single-point precision |
//! | NDCG | Normalized Discounted Cumulative Gain | Position-aware ranking quality |
//! | P@k | Precision at k | Fraction of top-k that are relevant |
//! | R@k | Recall at k | Fraction of relevant found in top-k |
//! | F1@k | F1 score at k | Harmonic mean of P@k and R@k |

pub mod aggregate;
pub mod engine;
pub mod metrics;

// Re-export commonly used types and functions
// Per-query scoring
pub use metrics::{dcg, evaluate_query, f1_score, ndcg, PrecisionRecallCurve, QueryMetrics};
// Aggregation
pub use aggregate::{compensated_mean, AggregateMetrics, CompensatedSum, CorpusAccumulator};
// Corpus evaluation pass
pub use engine::{evaluate, Evaluation};
