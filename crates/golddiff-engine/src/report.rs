#![forbid(unsafe_code)]

//! Stable report-line formatting.
//!
//! External test suites pattern-match the harness log, so the wording of
//! every failure line is part of the contract and must not drift. Shapes,
//! name lists and floats follow Python `repr` conventions for harness-log
//! compatibility: tuples as `(5, 6)` / `(9,)`, name lists as
//! `['c.0', 'c.1']`, floats in exponent notation outside `[1e-4, 1e16)`
//! with a signed two-digit exponent.

use std::fmt::Write as _;
use std::path::Path;

/// `File Not Found: <path>` — emitted for an absent gold or output file.
#[must_use]
pub fn file_not_found(path: &Path) -> String {
    format!("File Not Found: {}\n", path.display())
}

/// Both full name lists, gold first, for dataset-set divergence.
#[must_use]
pub fn dataset_set_mismatch(gold_names: &[String], test_names: &[String]) -> String {
    format!(
        "Datasets in gold file:\n{}\nDatasets in test file:\n{}\n",
        format_name_list(gold_names),
        format_name_list(test_names)
    )
}

/// `Mismatching shape for dataset '<name>' (gold:(5, 6), test:(9, 9))`
#[must_use]
pub fn shape_mismatch(name: &str, gold: &[usize], test: &[usize]) -> String {
    format!(
        "Mismatching shape for dataset '{name}' (gold:{}, test:{})\n",
        format_shape(gold),
        format_shape(test)
    )
}

/// `Absolute tolerance exceeded in '<name>' (diff:0.4268, abs_tol:1e-15)`
#[must_use]
pub fn value_mismatch(name: &str, max_abs_diff: f64, abs_tol: f64) -> String {
    format!(
        "Absolute tolerance exceeded in '{name}' (diff:{}, abs_tol:{})\n",
        format_float(max_abs_diff),
        format_float(abs_tol)
    )
}

/// Render a shape as a Python tuple, including the one-element `(9,)` form.
#[must_use]
pub fn format_shape(shape: &[usize]) -> String {
    match shape {
        [] => String::from("()"),
        [only] => format!("({only},)"),
        _ => {
            let mut out = String::from("(");
            for (idx, dim) in shape.iter().enumerate() {
                if idx > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{dim}");
            }
            out.push(')');
            out
        }
    }
}

/// Render dataset names as a Python list of single-quoted strings.
#[must_use]
pub fn format_name_list(names: &[String]) -> String {
    let mut out = String::from("[");
    for (idx, name) in names.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "'{name}'");
    }
    out.push(']');
    out
}

/// Render a float the way Python `repr` does: positional notation in
/// `[1e-4, 1e16)`, otherwise exponent notation with a signed two-digit
/// exponent (`1e-15`, `1.5e-05`, `1e+16`).
#[must_use]
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return String::from("nan");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "inf" } else { "-inf" });
    }
    let magnitude = value.abs();
    if magnitude != 0.0 && (magnitude < 1e-4 || magnitude >= 1e16) {
        let shortest = format!("{value:e}");
        if let Some((mantissa, exponent)) = shortest.split_once('e') {
            if let Ok(exponent) = exponent.parse::<i32>() {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{mantissa}e{sign}{:02}", exponent.abs());
            }
        }
        shortest
    } else {
        let positional = format!("{value}");
        if positional.contains('.') {
            positional
        } else {
            // Integral floats still print a decimal point.
            format!("{positional}.0")
        }
    }
}
