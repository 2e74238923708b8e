//! Default evaluation configuration constants.
//!
//! These values define the out-of-the-box behavior of the evaluation engine
//! and the CLI. Callers can override the cutoff set per invocation; the
//! defaults here are what the tool reports when nothing is specified.
//!
//! # Usage
//!
//! ```
//! use rankeval_core::config::DEFAULT_CUTOFFS;
//!
//! let horizon = DEFAULT_CUTOFFS.iter().copied().max().unwrap_or(0);
//! assert_eq!(horizon, 100);
//! ```

/// Rank depths at which Precision, Recall, and F1 are reported.
///
/// These are the cutoffs conventionally reported for TREC ad-hoc runs.
/// The largest cutoff doubles as the horizon the cumulative precision/recall
/// curve is extended to, so every cutoff is always readable from the curve
/// even when a query retrieved fewer documents.
pub const DEFAULT_CUTOFFS: &[usize] = &[5, 10, 20, 50, 100];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cutoffs_sorted_ascending() {
        assert!(
            DEFAULT_CUTOFFS.windows(2).all(|w| w[0] < w[1]),
            "Cutoffs must be strictly ascending"
        );
    }

    #[test]
    fn test_default_cutoffs_nonempty() {
        assert!(!DEFAULT_CUTOFFS.is_empty());
    }

    #[test]
    fn test_largest_cutoff_is_horizon() {
        // The curve extension reaches rank 100 with the default set
        assert_eq!(DEFAULT_CUTOFFS.iter().copied().max(), Some(100));
    }
}
