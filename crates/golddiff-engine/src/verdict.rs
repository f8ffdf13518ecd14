#![forbid(unsafe_code)]

//! Test-case verdict aggregation across the declared output files.

use crate::compare::DEFAULT_ABS_TOL;
use crate::engine::{diff_file, FileVerdict};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Machine-matchable failure keyword surfaced to the harness log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailReason {
    MissingGoldFile,
    MissingOutputFile,
    MismatchingDatasets,
    DataDiff,
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingGoldFile => "MISSING GOLD FILE",
            Self::MissingOutputFile => "MISSING OUTPUT FILE",
            Self::MismatchingDatasets => "MISMATCHING DATASETS",
            Self::DataDiff => "DATA DIFF",
        })
    }
}

/// Terminal status of one test-case evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum TestStatus {
    Pass,
    Fail(FailReason),
}

/// Aggregate verdict for one test-case evaluation: terminal status plus
/// the concatenated diagnostic report, in file-declaration order.
///
/// Once failed, a verdict never returns to Pass within the same
/// evaluation; diagnostic accumulation continues for shape/value
/// mismatches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestVerdict {
    pub status: TestStatus,
    pub report: String,
}

impl TestVerdict {
    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.status == TestStatus::Pass
    }

    fn set_failed(&mut self, reason: FailReason) {
        // Pass -> Fail is one-way; the reason tracks the most recent
        // failure, so a structural halt owns the terminal reason.
        self.status = TestStatus::Fail(reason);
    }
}

/// One test case's diff declaration, consumed from the harness's spec
/// layer: which output files to compare and at what absolute tolerance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPlan {
    pub gold_dir: PathBuf,
    pub test_dir: PathBuf,
    pub files: Vec<String>,
    #[serde(default = "default_abs_tol")]
    pub abs_tol: f64,
}

fn default_abs_tol() -> f64 {
    DEFAULT_ABS_TOL
}

impl EvaluationPlan {
    #[must_use]
    pub fn new(gold_dir: impl Into<PathBuf>, test_dir: impl Into<PathBuf>, files: Vec<String>) -> Self {
        Self {
            gold_dir: gold_dir.into(),
            test_dir: test_dir.into(),
            files,
            abs_tol: DEFAULT_ABS_TOL,
        }
    }

    #[must_use]
    pub fn with_abs_tol(mut self, abs_tol: f64) -> Self {
        self.abs_tol = abs_tol;
        self
    }
}

/// Evaluate one test case: diff every declared file in declaration order.
///
/// Structural failures (missing file, mismatching dataset sets) stop the
/// evaluation immediately; continuing would not be informative and could
/// mask the root cause. Shape/value failures mark the case failed but the
/// remaining files are still diffed, so one run reports every divergent
/// file. Owns no shared state; safe to invoke reentrantly from concurrent
/// harness workers.
#[must_use]
pub fn evaluate(plan: &EvaluationPlan) -> TestVerdict {
    let mut verdict = TestVerdict {
        status: TestStatus::Pass,
        report: String::new(),
    };

    for filename in &plan.files {
        let gold_path = plan.gold_dir.join(filename);
        let test_path = plan.test_dir.join(filename);
        debug!(file = %filename, abs_tol = plan.abs_tol, "diffing declared file");

        let diff = diff_file(&gold_path, &test_path, plan.abs_tol);
        verdict.report.push_str(&diff.report);
        if let FileVerdict::Fail(reason) = diff.verdict {
            verdict.set_failed(reason);
            if diff.is_structural_failure() {
                break;
            }
        }
    }

    verdict
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_reason_keywords_are_stable() {
        assert_eq!(FailReason::MissingGoldFile.to_string(), "MISSING GOLD FILE");
        assert_eq!(
            FailReason::MissingOutputFile.to_string(),
            "MISSING OUTPUT FILE"
        );
        assert_eq!(
            FailReason::MismatchingDatasets.to_string(),
            "MISMATCHING DATASETS"
        );
        assert_eq!(FailReason::DataDiff.to_string(), "DATA DIFF");
    }

    #[test]
    fn plan_tolerance_defaults_when_omitted() {
        let plan: EvaluationPlan = serde_json::from_str(
            r#"{"gold_dir": "gold", "test_dir": ".", "files": ["out.json"]}"#,
        )
        .expect("valid plan");
        assert_eq!(plan.abs_tol, DEFAULT_ABS_TOL);
    }

    #[test]
    fn plan_tolerance_is_overridable() {
        let plan = EvaluationPlan::new("gold", ".", vec![String::from("out.json")])
            .with_abs_tol(1e-6);
        assert_eq!(plan.abs_tol, 1e-6);
    }

    #[test]
    fn verdict_never_returns_to_pass() {
        let mut verdict = TestVerdict {
            status: TestStatus::Fail(FailReason::DataDiff),
            report: String::new(),
        };
        verdict.set_failed(FailReason::MissingGoldFile);
        assert_eq!(
            verdict.status,
            TestStatus::Fail(FailReason::MissingGoldFile)
        );
        assert!(!verdict.is_pass());
    }
}
