//! Input records: JSON values viewed as row-major grids of leaves.

use dtx_tensor::Shape;
use serde_json::Value;

use crate::error::{Result, TransformError};

/// A scalar, 1-D, or rectangular 2-D JSON value with its leaves flattened.
#[derive(Debug)]
pub(crate) struct Record<'a> {
    shape: Shape,
    leaves: Vec<&'a Value>,
}

impl<'a> Record<'a> {
    pub(crate) fn from_json(value: &'a Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Ok(Self {
                shape: Shape::new(vec![1]),
                leaves: vec![value],
            });
        };

        let row_count = items.iter().filter(|item| item.is_array()).count();
        if row_count == 0 {
            return Ok(Self {
                shape: Shape::new(vec![items.len()]),
                leaves: items.iter().collect(),
            });
        }
        if row_count != items.len() {
            return Err(TransformError::InvalidInput {
                reason: "record mixes rows and scalar values".to_string(),
            });
        }

        let mut cols = None;
        let mut leaves = Vec::new();
        for (r, item) in items.iter().enumerate() {
            let Value::Array(row) = item else {
                continue;
            };
            let expected = *cols.get_or_insert(row.len());
            if row.len() != expected {
                return Err(TransformError::InvalidInput {
                    reason: format!("row {r} has {} columns, expected {expected}", row.len()),
                });
            }
            if row.iter().any(Value::is_array) {
                return Err(TransformError::UnsupportedRank { rank: 3 });
            }
            leaves.extend(row.iter());
        }

        Ok(Self {
            shape: Shape::new(vec![items.len(), cols.unwrap_or(0)]),
            leaves,
        })
    }

    pub(crate) fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Column of the leaf at flat position `element`.
    pub(crate) fn column_of(&self, element: usize) -> usize {
        match self.shape.dims().last() {
            Some(&cols) if cols > 0 => element % cols,
            _ => 0,
        }
    }

    pub(crate) fn leaves(&self) -> impl Iterator<Item = (usize, &'a Value)> + '_ {
        self.leaves.iter().copied().enumerate()
    }
}
