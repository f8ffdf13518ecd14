#![forbid(unsafe_code)]

//! Golden-file regression comparator core.
//!
//! Given the gold and candidate container files a test case declares, this
//! crate decides Pass/Fail within an absolute numeric tolerance and builds
//! the diagnostic report the surrounding harness captures in its logs.
//!
//! ## Module layout
//!
//! | Module    | Contents                                                    |
//! |-----------|-------------------------------------------------------------|
//! | `compare` | [`compare`], [`ComparisonOutcome`], [`DEFAULT_ABS_TOL`]     |
//! | `report`  | stable report-line formatting (pattern-matched externally)  |
//! | `engine`  | [`diff_file`], [`FileDiff`], [`FileVerdict`]                |
//! | `verdict` | [`evaluate`], [`EvaluationPlan`], [`TestVerdict`]           |
//!
//! Structural failures (missing file, mismatching dataset sets) halt the
//! evaluation immediately; numeric failures accumulate across every
//! declared file so one run reports every divergent dataset.

pub mod compare;
pub mod engine;
pub mod report;
pub mod verdict;

// ── Re-exports: flat public API ─────────────────────────────────────
pub use compare::{compare, max_abs_diff, ComparisonOutcome, DEFAULT_ABS_TOL};
pub use engine::{diff_file, FileDiff, FileVerdict};
pub use verdict::{evaluate, EvaluationPlan, FailReason, TestStatus, TestVerdict};
