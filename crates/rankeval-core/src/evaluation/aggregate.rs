//! Cross-query aggregation with numerically stable summation.
//!
//! Per-query scores are collected into an explicit accumulator owned by the
//! evaluation run, then averaged in a second pass. Sums use Neumaier's
//! compensated algorithm so the reported means do not depend on the order
//! queries were folded in.

use crate::error::EvalError;
use crate::evaluation::metrics::QueryMetrics;
use serde::Serialize;
use std::collections::BTreeMap;

// ============================================================================
// Compensated Summation
// ============================================================================

/// Compensated floating-point accumulator (Neumaier's variant of Kahan
/// summation).
///
/// Carries a correction term holding the low-order bits a naive running sum
/// drops, including the case where the incoming value is larger than the
/// running sum.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompensatedSum {
    sum: f64,
    correction: f64,
}

impl CompensatedSum {
    /// Creates a zeroed accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one value.
    pub fn add(&mut self, value: f64) {
        let total = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.correction += (self.sum - total) + value;
        } else {
            self.correction += (value - total) + self.sum;
        }
        self.sum = total;
    }

    /// The corrected running total.
    pub fn total(&self) -> f64 {
        self.sum + self.correction
    }
}

/// Arithmetic mean computed with compensated summation.
///
/// Returns 0.0 for an empty slice.
pub fn compensated_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sum = CompensatedSum::new();
    for &value in values {
        sum.add(value);
    }
    sum.total() / values.len() as f64
}

// ============================================================================
// Corpus Accumulator
// ============================================================================

/// Running per-query score collections for one evaluation pass.
///
/// The engine records each evaluated query exactly once; `finish` turns the
/// collections into corpus-level means. Owning the collections here keeps
/// the engine free of ambient mutable state.
#[derive(Debug, Clone, Default)]
pub struct CorpusAccumulator {
    queries_evaluated: usize,
    total_retrieved: usize,
    total_relevant: usize,
    total_relevant_retrieved: usize,
    average_precision: Vec<f64>,
    r_precision: Vec<f64>,
    ndcg: Vec<f64>,
    precision_at_k: BTreeMap<usize, Vec<f64>>,
    recall_at_k: BTreeMap<usize, Vec<f64>>,
    f1_at_k: BTreeMap<usize, Vec<f64>>,
}

impl CorpusAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one query's metrics into the running collections.
    pub fn record(&mut self, metrics: &QueryMetrics) {
        self.queries_evaluated += 1;
        self.total_retrieved += metrics.retrieved;
        self.total_relevant += metrics.relevant;
        self.total_relevant_retrieved += metrics.relevant_retrieved;

        self.average_precision.push(metrics.average_precision);
        self.r_precision.push(metrics.r_precision);
        self.ndcg.push(metrics.ndcg);

        for (&k, &value) in &metrics.precision_at_k {
            self.precision_at_k.entry(k).or_default().push(value);
        }
        for (&k, &value) in &metrics.recall_at_k {
            self.recall_at_k.entry(k).or_default().push(value);
        }
        for (&k, &value) in &metrics.f1_at_k {
            self.f1_at_k.entry(k).or_default().push(value);
        }
    }

    /// Number of queries recorded so far.
    pub fn queries_evaluated(&self) -> usize {
        self.queries_evaluated
    }

    /// Finishes the pass, producing corpus-level totals and means.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::NoQueriesEvaluated`] when nothing was recorded;
    /// a mean over zero queries has no value to report.
    pub fn finish(self) -> Result<AggregateMetrics, EvalError> {
        if self.queries_evaluated == 0 {
            return Err(EvalError::NoQueriesEvaluated);
        }

        Ok(AggregateMetrics {
            queries_evaluated: self.queries_evaluated,
            total_retrieved: self.total_retrieved,
            total_relevant: self.total_relevant,
            total_relevant_retrieved: self.total_relevant_retrieved,
            mean_average_precision: compensated_mean(&self.average_precision),
            mean_r_precision: compensated_mean(&self.r_precision),
            mean_ndcg: compensated_mean(&self.ndcg),
            mean_precision_at_k: mean_by_cutoff(&self.precision_at_k),
            mean_recall_at_k: mean_by_cutoff(&self.recall_at_k),
            mean_f1_at_k: mean_by_cutoff(&self.f1_at_k),
        })
    }
}

fn mean_by_cutoff(values: &BTreeMap<usize, Vec<f64>>) -> BTreeMap<usize, f64> {
    values
        .iter()
        .map(|(&k, per_query)| (k, compensated_mean(per_query)))
        .collect()
}

/// Corpus-level evaluation results.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateMetrics {
    /// Queries that had relevance judgments and were scored
    pub queries_evaluated: usize,
    /// Documents retrieved across all evaluated queries
    pub total_retrieved: usize,
    /// Documents judged relevant across all evaluated queries
    pub total_relevant: usize,
    /// Relevant documents retrieved across all evaluated queries
    pub total_relevant_retrieved: usize,
    /// Mean Average Precision
    pub mean_average_precision: f64,
    /// Mean R-Precision
    pub mean_r_precision: f64,
    /// Mean NDCG
    pub mean_ndcg: f64,
    /// Mean Precision@k for each cutoff
    pub mean_precision_at_k: BTreeMap<usize, f64>,
    /// Mean Recall@k for each cutoff
    pub mean_recall_at_k: BTreeMap<usize, f64>,
    /// Mean F1@k for each cutoff
    pub mean_f1_at_k: BTreeMap<usize, f64>,
}

// ============================================================================
// Tests
// ============================================================================
