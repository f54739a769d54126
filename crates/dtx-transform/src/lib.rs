//! DTX data transform crate.
//!
//! Converts JSON records into numeric tensors for an inference engine, and
//! numeric outputs back into JSON text, as directed by model metadata.
//!
//! # Overview
//!
//! This crate provides:
//! - **Transformers**: Float, CategoricalString and DateTime conversions
//! - **Registry**: lookup of a transformer by the `Type` named in metadata
//! - **DataTransform**: input orchestration plus a per-output cache of
//!   transformed output text
//!
//! # Example
//!
//! ```
//! use dtx_tensor::{DType, Device, HostAllocator};
//! use dtx_transform::DataTransform;
//! use serde_json::json;
//!
//! let metadata = json!({
//!     "DataTransform": {
//!         "Input": {"ColumnTransform": [
//!             {"Type": "CategoricalString", "Map": {"apple": 0, "banana": 1}}
//!         ]},
//!         "Output": {"0": {"CategoricalString": {"0": "apple", "1": "banana"}}}
//!     }
//! });
//!
//! let mut transform = DataTransform::new();
//! let input = br#"["banana", "cherry"]"#;
//! let tensors = transform
//!     .transform_input(
//!         &metadata,
//!         &[input.len() as i64],
//!         input,
//!         &[DType::F32],
//!         Device::cpu(),
//!         &HostAllocator::new(),
//!     )
//!     .unwrap();
//! assert_eq!(tensors[0].to_f64_vec(), vec![1.0, -1.0]);
//!
//! transform.transform_output(&metadata, 0, &tensors[0]).unwrap();
//! assert_eq!(transform.output_str(0).unwrap(), r#"["banana","<unseen_label>"]"#);
//! ```
//!
//! # Failure model
//!
//! - Float and CategoricalString never fail on values; they write NaN or `-1`.
//! - DateTime fails hard on any value it cannot digitize.
//! - Reading an output index that was never transformed is a caller error.

pub mod calendar;
mod data_transform;
mod error;
pub mod metadata;
mod record;
pub mod registry;
pub mod transformers;

pub use data_transform::{DataTransform, UNKNOWN_LABEL};
pub use error::{DateTimeErrorKind, Result, TransformError};
pub use metadata::{CategoricalMap, ColumnTransform, InputTransforms, LabelMap, OutputTransform};
pub use registry::TransformKind;
pub use transformers::datetime::{DateTimeDigits, digitize_datetime};
pub use transformers::{NUM_DATE_TIME_COLS, Transformer};
