//! Corpus evaluation pass.
//!
//! Walks every ranking in a run, scores the queries that have relevance
//! judgments, and folds the scores into corpus-level aggregates. Queries
//! without judgments are skipped entirely and do not count toward any
//! total or mean.

use crate::error::EvalError;
use crate::evaluation::aggregate::{AggregateMetrics, CorpusAccumulator};
use crate::evaluation::metrics::{evaluate_query, QueryMetrics};
use crate::qrels::Qrels;
use crate::run::Run;
use tracing::{debug, info};

/// Complete results of one evaluation pass.
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Cutoffs the @k metrics were computed at, ascending and deduplicated
    pub cutoffs: Vec<usize>,
    /// Per-query metrics in run iteration order (judged queries only)
    pub per_query: Vec<QueryMetrics>,
    /// Corpus-level totals and means
    pub aggregate: AggregateMetrics,
}

/// Evaluates a run against relevance judgments.
///
/// Cutoffs are sorted ascending and deduplicated before scoring; the
/// largest cutoff sets the horizon each query's precision-recall curve is
/// extended to.
///
/// # Errors
///
/// Returns [`EvalError::NoQueriesEvaluated`] when no query in the run has
/// relevance judgments.
pub fn evaluate(qrels: &Qrels, run: &Run, cutoffs: &[usize]) -> Result<Evaluation, EvalError> {
    let mut cutoffs = cutoffs.to_vec();
    cutoffs.sort_unstable();
    cutoffs.dedup();

    info!(
        "Evaluating {} run queries against judgments for {} queries",
        run.num_queries(),
        qrels.num_queries()
    );

    let mut accumulator = CorpusAccumulator::new();
    let mut per_query = Vec::new();

    for (query_id, ranking) in run.iter() {
        let relevant = match qrels.relevant_docs(query_id) {
            Some(docs) => docs,
            None => {
                debug!("Skipping query {}: no relevance judgments", query_id);
                continue;
            }
        };

        let metrics = evaluate_query(query_id, ranking, relevant, &cutoffs);
        accumulator.record(&metrics);
        per_query.push(metrics);
    }

    let aggregate = accumulator.finish()?;
    info!(
        "Evaluated {} queries: MAP {:.4}, mean NDCG {:.4}",
        aggregate.queries_evaluated, aggregate.mean_average_precision, aggregate.mean_ndcg
    );

    Ok(Evaluation {
        cutoffs,
        per_query,
        aggregate,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> (Qrels, Run) {
        let mut qrels = Qrels::new();
        qrels.add_relevant("q1", "d1");
        qrels.add_relevant("q1", "d2");

        let mut run = Run::new();
        run.add_result("q1", "d1");
        run.add_result("q1", "x1");
        run.add_result("q1", "d2");

        (qrels, run)
    }

    #[test]
    fn test_evaluate_end_to_end() {
        let (qrels, run) = fixtures();
        let evaluation = evaluate(&qrels, &run, &[5, 10]).unwrap();

        assert_eq!(evaluation.per_query.len(), 1);
        assert_eq!(evaluation.aggregate.queries_evaluated, 1);
        assert_eq!(evaluation.aggregate.total_retrieved, 3);
        assert_eq!(evaluation.aggregate.total_relevant, 2);
        assert_eq!(evaluation.aggregate.total_relevant_retrieved, 2);

        // AP = (1/1 + 2/3) / 2
        assert!((evaluation.aggregate.mean_average_precision - 0.8333).abs() < 1e-4);
        // P@5 = 2/5, full recall by rank 5
        assert!((evaluation.aggregate.mean_precision_at_k[&5] - 0.4).abs() < 1e-9);
        assert!((evaluation.aggregate.mean_recall_at_k[&5] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unjudged_queries_excluded_from_totals() {
        let (qrels, mut run) = fixtures();
        run.add_result("q9", "d1");
        run.add_result("q9", "d2");

        let evaluation = evaluate(&qrels, &run, &[5]).unwrap();

        // q9 has no judgments: it contributes to no count or mean
        assert_eq!(evaluation.per_query.len(), 1);
        assert_eq!(evaluation.per_query[0].query_id, "q1");
        assert_eq!(evaluation.aggregate.queries_evaluated, 1);
        assert_eq!(evaluation.aggregate.total_retrieved, 3);
    }

    #[test]
    fn test_no_judged_queries_is_fatal() {
        let mut qrels = Qrels::new();
        qrels.add_relevant("q1", "d1");

        let mut run = Run::new();
        run.add_result("q9", "d1");

        let result = evaluate(&qrels, &run, &[5]);
        assert!(matches!(result, Err(EvalError::NoQueriesEvaluated)));
    }

    #[test]
    fn test_cutoffs_sorted_and_deduplicated() {
        let (qrels, run) = fixtures();
        let evaluation = evaluate(&qrels, &run, &[100, 5, 5, 10]).unwrap();

        assert_eq!(evaluation.cutoffs, vec![5, 10, 100]);
        let keys: Vec<usize> = evaluation.per_query[0].precision_at_k.keys().copied().collect();
        assert_eq!(keys, vec![5, 10, 100]);
    }

    #[test]
    fn test_per_query_follows_run_iteration_order() {
        let mut qrels = Qrels::new();
        qrels.add_relevant("q1", "d1");
        qrels.add_relevant("q2", "d1");
        qrels.add_relevant("q10", "d1");

        let mut run = Run::new();
        run.add_result("q2", "d1");
        run.add_result("q10", "d1");
        run.add_result("q1", "d1");

        let evaluation = evaluate(&qrels, &run, &[5]).unwrap();
        let ids: Vec<&str> = evaluation
            .per_query
            .iter()
            .map(|m| m.query_id.as_str())
            .collect();
        // Lexicographic query order, matching run iteration
        assert_eq!(ids, vec!["q1", "q10", "q2"]);
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let (qrels, run) = fixtures();
        let a = evaluate(&qrels, &run, &[5, 10]).unwrap();
        let b = evaluate(&qrels, &run, &[5, 10]).unwrap();

        assert_eq!(
            a.aggregate.mean_average_precision.to_bits(),
            b.aggregate.mean_average_precision.to_bits()
        );
        assert_eq!(a.aggregate.mean_ndcg.to_bits(), b.aggregate.mean_ndcg.to_bits());
    }
}
