#![forbid(unsafe_code)]

//! Pairwise dataset comparison under an absolute tolerance.

use golddiff_store::Dataset;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default absolute tolerance: tight enough to flag any output that is not
/// bitwise-identical in double precision, overridable per declaration.
pub const DEFAULT_ABS_TOL: f64 = 1e-15;

/// Outcome of comparing one dataset pair or one file pair.
///
/// Produced once and never mutated; per-dataset variants come from
/// [`compare`], per-file variants from the diff engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    Match,
    ShapeMismatch {
        gold: Vec<usize>,
        test: Vec<usize>,
    },
    ValueMismatch {
        max_abs_diff: f64,
        abs_tol: f64,
    },
    DatasetSetMismatch {
        gold_names: Vec<String>,
        test_names: Vec<String>,
    },
    FileMissing {
        path: PathBuf,
    },
}

impl ComparisonOutcome {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Compare a gold/candidate dataset pair.
///
/// Shape is checked first; on disagreement no values are inspected.
/// Otherwise the element-wise absolute difference is reduced by maximum
/// (not mean, not relative) so a single outlying element is always caught.
/// The tolerance boundary is inclusive: `max_abs_diff == abs_tol` passes.
#[must_use]
pub fn compare(gold: &Dataset, test: &Dataset, abs_tol: f64) -> ComparisonOutcome {
    if gold.shape() != test.shape() {
        return ComparisonOutcome::ShapeMismatch {
            gold: gold.shape().to_vec(),
            test: test.shape().to_vec(),
        };
    }
    let max_abs_diff = max_abs_diff(gold.values(), test.values());
    if max_abs_diff > abs_tol {
        return ComparisonOutcome::ValueMismatch {
            max_abs_diff,
            abs_tol,
        };
    }
    ComparisonOutcome::Match
}

/// Maximum element-wise absolute difference; 0.0 for empty datasets.
#[must_use]
pub fn max_abs_diff(gold: &[f64], test: &[f64]) -> f64 {
    gold.iter()
        .zip(test.iter())
        .map(|(g, t)| (g - t).abs())
        .fold(0.0_f64, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use golddiff_store::DType;

    fn dataset(name: &str, shape: Vec<usize>, values: Vec<f64>) -> Dataset {
        Dataset::new(name, shape, DType::Float64, values)
    }

    #[test]
    fn identical_datasets_match() {
        let gold = dataset("c.0", vec![2, 2], vec![1.0, 2.0, 3.0, 4.0]);
        let test = gold.clone();
        assert_eq!(compare(&gold, &test, DEFAULT_ABS_TOL), ComparisonOutcome::Match);
    }

    #[test]
    fn shape_mismatch_reports_both_shapes_without_value_inspection() {
        let gold = dataset("c.0", vec![2, 3], vec![0.0; 6]);
        let test = dataset("c.0", vec![3, 2], vec![9.0; 6]);
        assert_eq!(
            compare(&gold, &test, DEFAULT_ABS_TOL),
            ComparisonOutcome::ShapeMismatch {
                gold: vec![2, 3],
                test: vec![3, 2],
            }
        );
    }

    #[test]
    fn value_mismatch_carries_max_diff_and_tolerance() {
        let gold = dataset("c.0", vec![3], vec![0.0, 1.0, 2.0]);
        let test = dataset("c.0", vec![3], vec![0.0, 1.4268, 2.0]);
        match compare(&gold, &test, DEFAULT_ABS_TOL) {
            ComparisonOutcome::ValueMismatch {
                max_abs_diff,
                abs_tol,
            } => {
                assert!((max_abs_diff - 0.4268).abs() < 1e-12);
                assert_eq!(abs_tol, DEFAULT_ABS_TOL);
            }
            other => panic!("expected ValueMismatch, got {other:?}"),
        }
    }

    #[test]
    fn tolerance_boundary_is_inclusive() {
        let gold = dataset("c.0", vec![1], vec![0.0]);
        let test = dataset("c.0", vec![1], vec![1e-6]);
        assert_eq!(compare(&gold, &test, 1e-6), ComparisonOutcome::Match);
        assert!(matches!(
            compare(&gold, &test, 0.999e-6),
            ComparisonOutcome::ValueMismatch { .. }
        ));
    }

    #[test]
    fn max_reduction_catches_single_outlier() {
        let mut values = vec![0.0; 100];
        values[73] = 5e-3;
        let gold = dataset("c.0", vec![100], vec![0.0; 100]);
        let test = dataset("c.0", vec![100], values);
        match compare(&gold, &test, DEFAULT_ABS_TOL) {
            ComparisonOutcome::ValueMismatch { max_abs_diff, .. } => {
                assert_eq!(max_abs_diff, 5e-3);
            }
            other => panic!("expected ValueMismatch, got {other:?}"),
        }
    }

    #[test]
    fn empty_datasets_match() {
        let gold = dataset("empty", vec![0], vec![]);
        let test = dataset("empty", vec![0], vec![]);
        assert_eq!(compare(&gold, &test, DEFAULT_ABS_TOL), ComparisonOutcome::Match);
    }

    #[test]
    fn nan_difference_does_not_exceed_tolerance() {
        // NaN > abs_tol is false, so NaN differences never trip the
        // tolerance.
        let gold = dataset("c.0", vec![1], vec![f64::NAN]);
        let test = dataset("c.0", vec![1], vec![f64::NAN]);
        assert_eq!(compare(&gold, &test, DEFAULT_ABS_TOL), ComparisonOutcome::Match);
    }
}
