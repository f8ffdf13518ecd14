#![forbid(unsafe_code)]

//! Read-only access to named-array container files.
//!
//! A container file holds multiple named n-dimensional numeric arrays
//! ("datasets"). The comparator core treats the format as opaque beyond
//! existence, enumerable dataset names, and per-dataset shape and values;
//! this crate provides the one shipped backend, a JSON named-array
//! document.
//!
//! ## Module layout
//!
//! | Module      | Contents                                        |
//! |-------------|-------------------------------------------------|
//! | `dataset`   | [`Dataset`], [`DType`]                          |
//! | `container` | [`ContainerFile`], [`StoreError`]               |

pub mod container;
pub mod dataset;

pub use container::{ContainerFile, StoreError};
pub use dataset::{DType, Dataset};
