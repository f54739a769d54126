use dtx_tensor::{DType, NdArray};
use dtx_transform::DateTimeDigits;
use serde::{Deserialize, Serialize};

/// Result of an `input` run: one report per produced tensor.
#[derive(Debug, Serialize)]
pub struct InputResult {
    pub tensors: Vec<TensorReport>,
}

/// A produced tensor, flattened for display.
///
/// NaN values serialize as `null`.
#[derive(Debug, Serialize)]
pub struct TensorReport {
    pub index: usize,
    pub dtype: DType,
    pub shape: Vec<usize>,
    /// Buffer size in bytes at `dtype`.
    pub bytes: usize,
    pub values: Vec<f64>,
}

impl TensorReport {
    pub fn from_ndarray(index: usize, array: &NdArray) -> Self {
        Self {
            index,
            dtype: array.dtype(),
            shape: array.shape().dims().to_vec(),
            bytes: array.len() * array.dtype().size(),
            values: array.to_f64_vec(),
        }
    }

    /// Number of elements that hold NaN.
    pub fn nan_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

/// Tensor file read by the `output` command.
///
/// `null` entries in `data` read as NaN.
#[derive(Debug, Deserialize)]
pub struct TensorFile {
    pub shape: Vec<usize>,
    #[serde(default)]
    pub dtype: DType,
    pub data: Vec<Option<f64>>,
}

/// One value passed to the `digitize` command and its outcome.
#[derive(Debug)]
pub struct DigitizeRow {
    pub value: String,
    pub outcome: Result<DateTimeDigits, String>,
}

impl DigitizeRow {
    pub fn is_error(&self) -> bool {
        self.outcome.is_err()
    }
}
