//! Typed view of the `DataTransform` section of model metadata.
//!
//! Metadata stays a caller-owned [`serde_json::Value`]. Only the sub-document a
//! call needs is deserialized, so unrelated metadata is never validated.
//!
//! ```json
//! {
//!   "DataTransform": {
//!     "Input": {
//!       "ColumnTransform": [
//!         {"Type": "DateTime"},
//!         {"Type": "CategoricalString", "Map": {"apple": 0, "banana": 1}}
//!       ]
//!     },
//!     "Output": {
//!       "0": {"CategoricalString": {"0": "apple", "1": "banana"}}
//!     }
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{Result, TransformError};

const INPUT_POINTER: &str = "/DataTransform/Input/ColumnTransform";

/// Label to code table for one categorical column.
pub type LabelMap = BTreeMap<String, f64>;

/// Input transforms, one entry per produced tensor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputTransforms {
    pub column_transform: Vec<ColumnTransform>,
}

/// Transform specification for one input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnTransform {
    /// Transformer kind. `None` means the input is cast without a transformer.
    #[serde(rename = "Type", alias = "type", default)]
    pub kind: Option<String>,

    /// Categorical label table (CategoricalString only).
    #[serde(rename = "Map", alias = "map", default)]
    pub map: Option<CategoricalMap>,
}

impl ColumnTransform {
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            map: None,
        }
    }

    #[must_use]
    pub fn with_map(mut self, map: CategoricalMap) -> Self {
        self.map = Some(map);
        self
    }
}

/// Categorical label tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoricalMap {
    /// One table shared by every column.
    Shared(LabelMap),
    /// One table per column. Empty or null entries mark numeric columns.
    PerColumn(Vec<Option<LabelMap>>),
}

impl CategoricalMap {
    /// Table for `column`, or `None` when the column is numeric.
    pub fn for_column(&self, column: usize) -> Option<&LabelMap> {
        match self {
            CategoricalMap::Shared(map) => Some(map),
            CategoricalMap::PerColumn(maps) => maps
                .get(column)
                .and_then(Option::as_ref)
                .filter(|map| !map.is_empty()),
        }
    }
}

/// Output transform for one output index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputTransform {
    /// Code to label table, keyed by the code's decimal text.
    #[serde(rename = "CategoricalString", default)]
    pub categorical_string: Option<BTreeMap<String, String>>,
}

fn output_pointer(index: usize) -> String {
    format!("/DataTransform/Output/{index}")
}

/// True when the metadata configures an input transform.
pub fn has_input_transform(metadata: &Value) -> bool {
    metadata.pointer(INPUT_POINTER).is_some()
}

/// True when the metadata configures a transform for output `index`.
pub fn has_output_transform(metadata: &Value, index: usize) -> bool {
    metadata.pointer(&output_pointer(index)).is_some()
}

/// Deserialize the input transform list.
pub fn input_transforms(metadata: &Value) -> Result<InputTransforms> {
    let columns = metadata
        .pointer(INPUT_POINTER)
        .ok_or(TransformError::MissingInputTransform)?;
    let column_transform =
        Vec::<ColumnTransform>::deserialize(columns).map_err(|e| TransformError::InvalidMetadata {
            path: "DataTransform.Input.ColumnTransform".to_string(),
            reason: e.to_string(),
        })?;
    if column_transform.is_empty() {
        return Err(TransformError::InvalidMetadata {
            path: "DataTransform.Input.ColumnTransform".to_string(),
            reason: "no column transforms listed".to_string(),
        });
    }
    Ok(InputTransforms { column_transform })
}

/// Code to label table for output `index`.
///
/// Keys that are not integers can never match a code and are skipped.
pub fn output_mapping(metadata: &Value, index: usize) -> Result<HashMap<i64, String>> {
    let path = || format!("DataTransform.Output.{index}");
    let section = metadata
        .pointer(&output_pointer(index))
        .ok_or(TransformError::MissingOutputTransform { index })?;
    let transform =
        OutputTransform::deserialize(section).map_err(|e| TransformError::InvalidMetadata {
            path: path(),
            reason: e.to_string(),
        })?;
    let table = transform
        .categorical_string
        .ok_or_else(|| TransformError::InvalidMetadata {
            path: path(),
            reason: "missing CategoricalString mapping".to_string(),
        })?;

    let mut mapping = HashMap::with_capacity(table.len());
    for (key, label) in table {
        match key.trim().parse::<i64>() {
            Ok(code) => {
                mapping.insert(code, label);
            }
            Err(_) => warn!(index, key = %key, "ignoring non-integer output mapping key"),
        }
    }
    Ok(mapping)
}
