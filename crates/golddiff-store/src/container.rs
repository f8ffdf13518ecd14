#![forbid(unsafe_code)]

use crate::dataset::{DType, Dataset};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("container not found: {path}")]
    NotFound { path: PathBuf },
    #[error("failed to read container {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("container parse failed for {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("dataset '{name}' in {path} declares shape {shape:?} for {actual} values")]
    ShapeDataMismatch {
        path: PathBuf,
        name: String,
        shape: Vec<usize>,
        actual: usize,
    },
    #[error("unknown dataset '{name}' in {path}")]
    UnknownDataset { path: PathBuf, name: String },
}

/// On-disk form of one dataset entry.
#[derive(Debug, Deserialize)]
struct RawDataset {
    shape: Vec<usize>,
    #[serde(default)]
    dtype: DType,
    data: Vec<f64>,
}

/// On-disk form of a container document. The `datasets` map keeps document
/// order (`serde_json` with `preserve_order`), which is the name order the
/// store reports.
#[derive(Debug, Deserialize)]
struct RawContainer {
    datasets: serde_json::Map<String, serde_json::Value>,
}

/// An open named-array container file.
///
/// All data is held in memory after `open` returns; the handle releases on
/// drop on every exit path, so concurrent evaluations never contend over
/// open-file resources.
#[derive(Debug, Clone)]
pub struct ContainerFile {
    path: PathBuf,
    names: Vec<String>,
    datasets: HashMap<String, Dataset>,
}

impl ContainerFile {
    /// Open a container file and read all datasets.
    ///
    /// Fails with [`StoreError::NotFound`] if the path does not exist and
    /// [`StoreError::Malformed`] if it is not a valid container document.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let container: RawContainer =
            serde_json::from_str(&raw).map_err(|source| StoreError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        let mut names = Vec::with_capacity(container.datasets.len());
        let mut datasets = HashMap::with_capacity(container.datasets.len());
        for (name, value) in container.datasets {
            let entry: RawDataset =
                serde_json::from_value(value).map_err(|source| StoreError::Malformed {
                    path: path.to_path_buf(),
                    source,
                })?;
            let expected: usize = entry.shape.iter().product();
            if expected != entry.data.len() {
                return Err(StoreError::ShapeDataMismatch {
                    path: path.to_path_buf(),
                    name,
                    shape: entry.shape,
                    actual: entry.data.len(),
                });
            }
            datasets.insert(
                name.clone(),
                Dataset::new(name.clone(), entry.shape, entry.dtype, entry.data),
            );
            names.push(name);
        }

        Ok(Self {
            path: path.to_path_buf(),
            names,
            datasets,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Dataset names in document order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Look up one dataset by name.
    pub fn dataset(&self, name: &str) -> Result<&Dataset, StoreError> {
        self.datasets
            .get(name)
            .ok_or_else(|| StoreError::UnknownDataset {
                path: self.path.clone(),
                name: name.to_owned(),
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
