#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Element type of a dataset as declared in the container document.
///
/// Integer data is held as exactly-representable `f64`; the comparator is
/// defined on absolute differences either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DType {
    #[default]
    Float64,
    Int64,
}

/// One named n-dimensional numeric array read from a container file.
///
/// Immutable once read: `values` is row-major and
/// `values.len() == shape.iter().product()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name: String,
    shape: Vec<usize>,
    dtype: DType,
    values: Vec<f64>,
}

impl Dataset {
    /// Build a dataset from row-major values.
    ///
    /// # Panics
    ///
    /// Panics if `values.len()` disagrees with the product of `shape`;
    /// callers own that invariant ([`crate::ContainerFile`] rejects such
    /// documents before construction).
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        shape: Vec<usize>,
        dtype: DType,
        values: Vec<f64>,
    ) -> Self {
        assert_eq!(
            shape.iter().product::<usize>(),
            values.len(),
            "dataset shape {shape:?} disagrees with {} values",
            values.len()
        );
        Self {
            name: name.into(),
            shape,
            dtype,
            values,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[must_use]
    pub fn dtype(&self) -> DType {
        self.dtype
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_accessors_roundtrip() {
        let ds = Dataset::new(
            String::from("c.0"),
            vec![2, 3],
            DType::Float64,
            vec![0.0; 6],
        );
        assert_eq!(ds.name(), "c.0");
        assert_eq!(ds.shape(), &[2, 3]);
        assert_eq!(ds.dtype(), DType::Float64);
        assert_eq!(ds.element_count(), 6);
    }

    #[test]
    fn dtype_deserializes_from_container_spelling() {
        let f: DType = serde_json::from_str("\"float64\"").expect("valid dtype");
        let i: DType = serde_json::from_str("\"int64\"").expect("valid dtype");
        assert_eq!(f, DType::Float64);
        assert_eq!(i, DType::Int64);
    }
}
