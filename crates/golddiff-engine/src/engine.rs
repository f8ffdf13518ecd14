#![forbid(unsafe_code)]

//! Per-file diff orchestration: existence check, dataset-set equality,
//! then per-dataset tolerance comparison.

use crate::compare::{compare, ComparisonOutcome};
use crate::report;
use crate::verdict::FailReason;
use golddiff_store::ContainerFile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, warn};

/// Verdict for one gold/candidate file pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum FileVerdict {
    Match,
    Fail(FailReason),
}

/// Result of diffing one candidate file against its gold counterpart.
///
/// `outcomes` is ordered: per-file outcomes first, then per-dataset
/// outcomes in the gold file's reported name order, which also drives the
/// line order of `report`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileDiff {
    pub verdict: FileVerdict,
    pub outcomes: Vec<(String, ComparisonOutcome)>,
    pub report: String,
}

impl FileDiff {
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.verdict == FileVerdict::Match
    }

    /// Structural failures halt the whole evaluation; numeric ones do not.
    #[must_use]
    pub fn is_structural_failure(&self) -> bool {
        matches!(
            self.verdict,
            FileVerdict::Fail(
                FailReason::MissingGoldFile
                    | FailReason::MissingOutputFile
                    | FailReason::MismatchingDatasets
            )
        )
    }

    fn structural(path_or_name: &str, outcome: ComparisonOutcome, reason: FailReason, report: String) -> Self {
        Self {
            verdict: FileVerdict::Fail(reason),
            outcomes: vec![(path_or_name.to_owned(), outcome)],
            report,
        }
    }
}

/// Diff one candidate file against its gold counterpart.
///
/// A missing gold file is a harness-configuration error, checked before the
/// candidate is even opened; a dataset-set divergence is structural and is
/// never value-compared. Shape and value mismatches do NOT short-circuit:
/// every dataset is checked so a single pass surfaces all divergences.
/// Both container handles are dropped before this returns, on every path.
#[must_use]
pub fn diff_file(gold_path: &Path, test_path: &Path, abs_tol: f64) -> FileDiff {
    let gold = match ContainerFile::open(gold_path) {
        Ok(gold) => gold,
        Err(err) => {
            warn!(path = %gold_path.display(), %err, "gold file unavailable");
            return FileDiff::structural(
                &gold_path.display().to_string(),
                ComparisonOutcome::FileMissing {
                    path: gold_path.to_path_buf(),
                },
                FailReason::MissingGoldFile,
                report::file_not_found(gold_path),
            );
        }
    };
    let test = match ContainerFile::open(test_path) {
        Ok(test) => test,
        Err(err) => {
            warn!(path = %test_path.display(), %err, "output file unavailable");
            return FileDiff::structural(
                &test_path.display().to_string(),
                ComparisonOutcome::FileMissing {
                    path: test_path.to_path_buf(),
                },
                FailReason::MissingOutputFile,
                report::file_not_found(test_path),
            );
        }
    };

    // Exact set equality in either direction; comparing a subset would
    // hide a structural regression. Order-insensitive on purpose.
    let gold_set: BTreeSet<&String> = gold.names().iter().collect();
    let test_set: BTreeSet<&String> = test.names().iter().collect();
    if gold_set != test_set {
        warn!(
            gold = %gold_path.display(),
            test = %test_path.display(),
            "dataset sets differ"
        );
        return FileDiff::structural(
            &gold_path.display().to_string(),
            ComparisonOutcome::DatasetSetMismatch {
                gold_names: gold.names().to_vec(),
                test_names: test.names().to_vec(),
            },
            FailReason::MismatchingDatasets,
            report::dataset_set_mismatch(gold.names(), test.names()),
        );
    }

    let mut outcomes = Vec::with_capacity(gold.len());
    let mut report = String::new();
    let mut any_mismatch = false;
    // Gold name order drives diagnostic ordering for harness log stability.
    for name in gold.names() {
        let (Ok(gold_ds), Ok(test_ds)) = (gold.dataset(name), test.dataset(name)) else {
            // Name sets were verified equal above.
            continue;
        };
        let outcome = compare(gold_ds, test_ds, abs_tol);
        match &outcome {
            ComparisonOutcome::Match => {}
            ComparisonOutcome::ShapeMismatch {
                gold: gold_shape,
                test: test_shape,
            } => {
                any_mismatch = true;
                report.push_str(&report::shape_mismatch(name, gold_shape, test_shape));
            }
            ComparisonOutcome::ValueMismatch {
                max_abs_diff,
                abs_tol,
            } => {
                any_mismatch = true;
                report.push_str(&report::value_mismatch(name, *max_abs_diff, *abs_tol));
            }
            // Per-file variants are never produced by `compare`.
            _ => {}
        }
        outcomes.push((name.clone(), outcome));
    }

    debug!(
        gold = %gold_path.display(),
        datasets = outcomes.len(),
        mismatch = any_mismatch,
        "file diff complete"
    );
    FileDiff {
        verdict: if any_mismatch {
            FileVerdict::Fail(FailReason::DataDiff)
        } else {
            FileVerdict::Match
        },
        outcomes,
        report,
    }
}
