//! Categorical label encoding.

use dtx_tensor::NdArray;
use serde_json::Value;
use tracing::trace;

use crate::error::{Result, TransformError};
use crate::metadata::{ColumnTransform, LabelMap};
use crate::record::Record;
use crate::transformers::float::float_or_bad;

/// Written when a label has no entry in the map.
pub const MISSING_VALUE: f64 = -1.0;

/// Code for one leaf under `map`. Lookup is exact and case-sensitive.
///
/// Numbers are looked up by their JSON text, so `3` matches the label `"3"`.
pub fn encode_label(map: &LabelMap, leaf: &Value) -> Option<f64> {
    match leaf {
        Value::String(label) => map.get(label).copied(),
        Value::Number(n) => map.get(&n.to_string()).copied(),
        _ => None,
    }
}

/// Maps labels to codes from the column transform's `Map`.
///
/// With a per-column map, columns without a table are converted as floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoricalStringTransformer;

impl CategoricalStringTransformer {
    pub(crate) fn map_record(
        &self,
        record: &Record<'_>,
        spec: &ColumnTransform,
        array: &mut NdArray,
    ) -> Result<()> {
        let map = spec
            .map
            .as_ref()
            .ok_or_else(|| TransformError::InvalidMetadata {
                path: "ColumnTransform.Map".to_string(),
                reason: "CategoricalString transform requires a Map".to_string(),
            })?;

        for (element, leaf) in record.leaves() {
            let value = match map.for_column(record.column_of(element)) {
                Some(labels) => encode_label(labels, leaf).unwrap_or_else(|| {
                    trace!(element, "label not in map, writing missing value");
                    MISSING_VALUE
                }),
                None => float_or_bad(element, leaf),
            };
            array.write(element, value)?;
        }
        Ok(())
    }
}
