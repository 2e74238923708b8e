//! Report formatting for evaluation results.
//!
//! Supports both a human-readable terminal report and JSON for scripting.
//! Formatters are pure string builders so they can be tested without
//! capturing stdout.

use rankeval_core::evaluation::{AggregateMetrics, Evaluation, QueryMetrics};
use serde::Serialize;
use std::collections::BTreeMap;

/// JSON output structure for an evaluation
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub cutoffs: &'a [usize],
    pub aggregate: &'a AggregateMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_query: Option<&'a [QueryMetrics]>,
}

/// Formats evaluation results as JSON.
pub fn format_json(evaluation: &Evaluation, include_per_query: bool) -> String {
    let per_query = if include_per_query {
        Some(evaluation.per_query.as_slice())
    } else {
        None
    };
    let report = JsonReport {
        cutoffs: &evaluation.cutoffs,
        aggregate: &evaluation.aggregate,
        per_query,
    };
    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
}

/// Formats the corpus-level summary for terminal output.
pub fn format_aggregate(evaluation: &Evaluation) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "=".repeat(80)));
    output.push_str("RETRIEVAL EVALUATION\n");
    output.push_str(&format!("{}\n", "=".repeat(80)));
    output.push_str(&aggregate_block(evaluation));
    output.push_str(&format!("{}\n", "=".repeat(80)));
    output.trim_end().to_string()
}

/// Formats per-query blocks followed by the corpus-level summary.
pub fn format_full(evaluation: &Evaluation) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", "=".repeat(80)));
    output.push_str("RETRIEVAL EVALUATION\n");
    output.push_str(&format!("{}\n", "=".repeat(80)));

    output.push_str(&format!("\n{}\n", "-".repeat(70)));
    output.push_str("PER-QUERY RESULTS\n");
    for metrics in &evaluation.per_query {
        output.push('\n');
        output.push_str(&query_block(metrics, &evaluation.cutoffs));
    }

    output.push_str(&aggregate_block(evaluation));
    output.push_str(&format!("{}\n", "=".repeat(80)));
    output.trim_end().to_string()
}

fn aggregate_block(evaluation: &Evaluation) -> String {
    let agg = &evaluation.aggregate;
    let mut output = String::new();

    output.push_str(&format!(
        "\nQueries evaluated: {} ({} retrieved, {} relevant, {} relevant retrieved)\n\n",
        agg.queries_evaluated, agg.total_retrieved, agg.total_relevant, agg.total_relevant_retrieved
    ));
    output.push_str(&format!("{:<16} {:>8.4}\n", "MAP", agg.mean_average_precision));
    output.push_str(&format!("{:<16} {:>8.4}\n", "Mean R-Precision", agg.mean_r_precision));
    output.push_str(&format!("{:<16} {:>8.4}\n", "Mean NDCG", agg.mean_ndcg));

    output.push_str(&format!("\n{}\n", "-".repeat(70)));
    output.push_str("MEANS BY CUTOFF\n");
    output.push_str(&cutoff_table(
        &evaluation.cutoffs,
        &agg.mean_precision_at_k,
        &agg.mean_recall_at_k,
        &agg.mean_f1_at_k,
    ));
    output
}

fn query_block(metrics: &QueryMetrics, cutoffs: &[usize]) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Query {} ({} retrieved, {} relevant, {} relevant retrieved)\n",
        metrics.query_id, metrics.retrieved, metrics.relevant, metrics.relevant_retrieved
    ));
    output.push_str(&format!(
        "  AP {:.4}   R-Precision {:.4}   NDCG {:.4}\n",
        metrics.average_precision, metrics.r_precision, metrics.ndcg
    ));
    output.push_str(&cutoff_table(
        cutoffs,
        &metrics.precision_at_k,
        &metrics.recall_at_k,
        &metrics.f1_at_k,
    ));
    output
}

fn cutoff_table(
    cutoffs: &[usize],
    precision: &BTreeMap<usize, f64>,
    recall: &BTreeMap<usize, f64>,
    f1: &BTreeMap<usize, f64>,
) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:>7} {:>10} {:>10} {:>10}\n",
        "k", "Precision", "Recall", "F1"
    ));
    for &k in cutoffs {
        output.push_str(&format!(
            "{:>7} {:>10.4} {:>10.4} {:>10.4}\n",
            k,
            precision.get(&k).copied().unwrap_or(0.0),
            recall.get(&k).copied().unwrap_or(0.0),
            f1.get(&k).copied().unwrap_or(0.0),
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankeval_core::evaluation::evaluate;
    use rankeval_core::qrels::Qrels;
    use rankeval_core::run::Run;

    fn sample_evaluation() -> Evaluation {
        let mut qrels = Qrels::new();
        qrels.add_relevant("q1", "d1");
        qrels.add_relevant("q1", "d2");

        let mut run = Run::new();
        run.add_result("q1", "d1");
        run.add_result("q1", "x1");
        run.add_result("q1", "d2");

        evaluate(&qrels, &run, &[5, 10]).unwrap()
    }

    #[test]
    fn test_format_aggregate_contains_summary() {
        let output = format_aggregate(&sample_evaluation());
        assert!(output.contains("RETRIEVAL EVALUATION"));
        assert!(output.contains("Queries evaluated: 1"));
        assert!(output.contains("MAP"));
        assert!(output.contains("0.8333"));
        assert!(output.contains("MEANS BY CUTOFF"));
    }

    #[test]
    fn test_format_full_lists_queries() {
        let output = format_full(&sample_evaluation());
        assert!(output.contains("PER-QUERY RESULTS"));
        assert!(output.contains("Query q1 (3 retrieved, 2 relevant, 2 relevant retrieved)"));
        assert!(output.contains("MEANS BY CUTOFF"));
    }

    #[test]
    fn test_format_json_without_per_query() {
        let output = format_json(&sample_evaluation(), false);
        assert!(output.contains("\"mean_average_precision\""));
        assert!(!output.contains("\"per_query\""));
    }

    #[test]
    fn test_format_json_with_per_query() {
        let output = format_json(&sample_evaluation(), true);
        assert!(output.contains("\"per_query\""));
        assert!(output.contains("\"query_id\": \"q1\""));
    }
}
