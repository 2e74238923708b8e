//! Per-query Information Retrieval metrics.
//!
//! This module implements the metrics reported for each judged query:
//! - Precision@k, Recall@k, F1@k over an extended precision/recall curve
//! - Average Precision (the per-query component of MAP)
//! - R-Precision
//! - NDCG with a natural-log rank discount
//!
//! All arithmetic edge cases (empty rankings, empty relevance sets) resolve
//! to defined zero scores rather than faults.
//!
//! # References
//!
//! - Järvelin & Kekäläinen (2002). "Cumulated gain-based evaluation of IR techniques"
//! - Voorhees & Harman (2005). "TREC: Experiment and Evaluation in Information Retrieval"

use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

// ============================================================================
// Precision/Recall Curve
// ============================================================================

/// Cumulative precision and recall by rank for one query.
///
/// Position `i` holds the values at rank `i + 1`. The curve covers ranks
/// `1..=max(N, horizon)` where `N` is the number of retrieved documents and
/// the horizon is the largest cutoff: past rank `N` no further documents
/// arrive, so the relevant-retrieved count freezes, recall stays flat, and
/// precision decays as `frozen_count / rank`.
#[derive(Debug, Clone, Default)]
pub struct PrecisionRecallCurve {
    precision: Vec<f64>,
    recall: Vec<f64>,
}

impl PrecisionRecallCurve {
    /// Precision at a 1-based rank, or 0.0 outside the curve.
    pub fn precision_at(&self, rank: usize) -> f64 {
        rank.checked_sub(1)
            .and_then(|i| self.precision.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Recall at a 1-based rank, or 0.0 outside the curve.
    pub fn recall_at(&self, rank: usize) -> f64 {
        rank.checked_sub(1)
            .and_then(|i| self.recall.get(i))
            .copied()
            .unwrap_or(0.0)
    }

    /// Number of ranks the curve covers.
    pub fn len(&self) -> usize {
        self.precision.len()
    }

    /// Returns true if the curve covers no ranks.
    pub fn is_empty(&self) -> bool {
        self.precision.is_empty()
    }
}

// ============================================================================
// Per-Query Metrics
// ============================================================================

/// Evaluation metrics for a single query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryMetrics {
    /// Query identifier the metrics belong to
    pub query_id: String,
    /// Number of documents retrieved
    pub retrieved: usize,
    /// Number of documents judged relevant
    pub relevant: usize,
    /// Number of relevant documents retrieved
    pub relevant_retrieved: usize,
    /// Non-interpolated Average Precision
    pub average_precision: f64,
    /// Precision at rank = number of relevant documents
    pub r_precision: f64,
    /// Normalized Discounted Cumulative Gain
    pub ndcg: f64,
    /// Precision@k for each cutoff
    pub precision_at_k: BTreeMap<usize, f64>,
    /// Recall@k for each cutoff
    pub recall_at_k: BTreeMap<usize, f64>,
    /// F1@k for each cutoff
    pub f1_at_k: BTreeMap<usize, f64>,
    /// The extended precision/recall curve the cutoffs were read from
    #[serde(skip)]
    pub curve: PrecisionRecallCurve,
}

/// Computes all metrics for one query.
///
/// Walks `ranking` in rank order against the `relevant` set, builds the
/// extended precision/recall curve, and reads the cutoff metrics from it.
/// `cutoffs` must be sorted ascending; the largest cutoff is the horizon the
/// curve is extended to.
///
/// An empty ranking, an empty relevant set, or both are legal inputs: every
/// affected metric is defined as 0.0.
///
/// # Arguments
///
/// * `query_id` - Identifier carried through to the output
/// * `ranking` - Retrieved documents in rank order, rank 1 first
/// * `relevant` - Documents judged relevant for this query
/// * `cutoffs` - Rank depths to report Precision/Recall/F1 at, ascending
pub fn evaluate_query(
    query_id: &str,
    ranking: &[String],
    relevant: &HashSet<String>,
    cutoffs: &[usize],
) -> QueryMetrics {
    let retrieved = ranking.len();
    let num_relevant = relevant.len();
    let horizon = cutoffs.last().copied().unwrap_or(0);

    let mut precision = Vec::with_capacity(retrieved.max(horizon));
    let mut recall = Vec::with_capacity(retrieved.max(horizon));
    let mut indicators = Vec::with_capacity(retrieved);

    let mut relevant_retrieved = 0usize;
    let mut precision_sum = 0.0;
    let mut r_precision_hits = 0usize;

    for (i, doc_id) in ranking.iter().enumerate() {
        let rank = i + 1;
        let hit = relevant.contains(doc_id);
        if hit {
            relevant_retrieved += 1;
        }

        let prec = relevant_retrieved as f64 / rank as f64;
        if hit {
            precision_sum += prec;
        }
        indicators.push(u8::from(hit));

        let rec = if num_relevant > 0 {
            relevant_retrieved as f64 / num_relevant as f64
        } else {
            0.0
        };

        // R-Precision reads the hit count at rank R; keep updating while the
        // walk is still within the first R ranks so a short ranking ends up
        // using its final count.
        if rank <= num_relevant {
            r_precision_hits = relevant_retrieved;
        }

        precision.push(prec);
        recall.push(rec);
    }

    // Extend the curve to the horizon: the hit count is frozen, recall is
    // flat, precision decays with rank.
    let final_recall = if num_relevant > 0 {
        relevant_retrieved as f64 / num_relevant as f64
    } else {
        0.0
    };
    for rank in retrieved + 1..=horizon {
        precision.push(relevant_retrieved as f64 / rank as f64);
        recall.push(final_recall);
    }

    let curve = PrecisionRecallCurve { precision, recall };

    let mut precision_at_k = BTreeMap::new();
    let mut recall_at_k = BTreeMap::new();
    let mut f1_at_k = BTreeMap::new();
    for &k in cutoffs {
        let p = curve.precision_at(k);
        let r = curve.recall_at(k);
        precision_at_k.insert(k, p);
        recall_at_k.insert(k, r);
        f1_at_k.insert(k, f1_score(p, r));
    }

    let average_precision = if num_relevant > 0 {
        precision_sum / num_relevant as f64
    } else {
        0.0
    };
    let r_precision = if num_relevant > 0 {
        r_precision_hits as f64 / num_relevant as f64
    } else {
        0.0
    };

    QueryMetrics {
        query_id: query_id.to_string(),
        retrieved,
        relevant: num_relevant,
        relevant_retrieved,
        average_precision,
        r_precision,
        ndcg: ndcg(&indicators),
        precision_at_k,
        recall_at_k,
        f1_at_k,
        curve,
    }
}

// ============================================================================
// NDCG (Normalized Discounted Cumulative Gain)
// ============================================================================

/// Computes the Discounted Cumulative Gain of a relevance indicator sequence.
///
/// # Formula
///
/// ```text
/// DCG = rel(1) + Σ rel(i) / ln(i)   for i in 2..=n
/// ```
///
/// The first rank carries its gain undiscounted; every later rank divides by
/// the natural log of its position.
pub fn dcg(indicators: &[u8]) -> f64 {
    indicators
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            let rank = i + 1;
            if rank == 1 {
                f64::from(score)
            } else {
                f64::from(score) / (rank as f64).ln()
            }
        })
        .sum()
}

/// Computes NDCG over a relevance indicator sequence.
///
/// The achieved DCG is divided by the DCG of the same sequence sorted
/// descending (every retrieved relevant document first). Returns 0.0 when
/// the ideal gain is zero, which happens exactly when no relevant document
/// was retrieved.
pub fn ndcg(indicators: &[u8]) -> f64 {
    let achieved = dcg(indicators);

    let mut ideal: Vec<u8> = indicators.to_vec();
    ideal.sort_unstable_by(|a, b| b.cmp(a));
    let ideal_gain = dcg(&ideal);

    if ideal_gain == 0.0 {
        0.0
    } else {
        achieved / ideal_gain
    }
}

/// Harmonic mean of precision and recall.
///
/// Defined as 0.0 unless both inputs are positive.
#[inline]
pub fn f1_score(precision: f64, recall: f64) -> f64 {
    if precision > 0.0 && recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

// ============================================================================
// Tests
// ============================================================================
