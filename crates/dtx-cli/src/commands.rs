//! Command implementations for the DTX CLI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use dtx_tensor::{DType, Device, HostAllocator, NdArray, Shape};
use dtx_transform::metadata::input_transforms;
use dtx_transform::{DataTransform, digitize_datetime};
use serde_json::Value;
use tracing::{info, info_span};

use crate::types::{DigitizeRow, InputResult, TensorFile, TensorReport};

/// Read and parse a metadata JSON file.
pub fn load_metadata(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read metadata {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse metadata {}", path.display()))
}

/// Run the input transforms declared in `metadata_path` over the raw JSON in
/// `input_path`.
///
/// When `dtypes` is empty every column transform produces `f32`.
pub fn run_input(
    metadata_path: &Path,
    input_path: &Path,
    dtypes: &[DType],
    max_elements: Option<usize>,
) -> Result<InputResult> {
    let span = info_span!("input", metadata = %metadata_path.display());
    let _guard = span.enter();

    let metadata = load_metadata(metadata_path)?;
    if !DataTransform::has_input_transform(&metadata) {
        bail!(
            "{} declares no input transform",
            metadata_path.display()
        );
    }
    let bytes =
        fs::read(input_path).with_context(|| format!("read input {}", input_path.display()))?;

    let dtypes = if dtypes.is_empty() {
        let columns = input_transforms(&metadata)?.column_transform.len();
        vec![DType::F32; columns]
    } else {
        dtypes.to_vec()
    };

    let mut allocator = HostAllocator::new();
    if let Some(limit) = max_elements {
        allocator = allocator.with_max_elements(limit);
    }

    let len = i64::try_from(bytes.len()).context("input file too large")?;
    let tensors = DataTransform::new()
        .transform_input(&metadata, &[len], &bytes, &dtypes, Device::cpu(), &allocator)
        .with_context(|| format!("transform input {}", input_path.display()))?;
    info!(tensors = tensors.len(), "input transformed");

    Ok(InputResult {
        tensors: tensors
            .iter()
            .enumerate()
            .map(|(index, array)| TensorReport::from_ndarray(index, array))
            .collect(),
    })
}

/// Decode the tensor in `tensor_path` with the output mapping at `index`.
///
/// Returns the transformed output text.
pub fn run_output(metadata_path: &Path, index: usize, tensor_path: &Path) -> Result<String> {
    let span = info_span!("output", index);
    let _guard = span.enter();

    let metadata = load_metadata(metadata_path)?;
    let array = load_tensor(tensor_path)?;

    let mut transform = DataTransform::new();
    transform
        .transform_output(&metadata, index, &array)
        .with_context(|| format!("transform output {index}"))?;
    let (size, dim) = transform.output_size_dim(index)?;
    info!(size, dim, "output transformed");
    Ok(transform.output_str(index)?.to_string())
}

/// Read a tensor file into an array of its declared dtype.
pub fn load_tensor(path: &Path) -> Result<NdArray> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read tensor {}", path.display()))?;
    let file: TensorFile =
        serde_json::from_str(&text).with_context(|| format!("parse tensor {}", path.display()))?;
    if !file.dtype.is_float() && file.data.iter().any(Option::is_none) {
        bail!(
            "{}: null entries need a float dtype, not {}",
            path.display(),
            file.dtype
        );
    }
    let values: Vec<f64> = file
        .data
        .iter()
        .map(|value| value.unwrap_or(f64::NAN))
        .collect();
    NdArray::from_values(Shape::new(file.shape), file.dtype, &values)
        .with_context(|| format!("build tensor from {}", path.display()))
}

/// Digitize each date/time value independently.
pub fn run_digitize(values: &[String]) -> Vec<DigitizeRow> {
    values
        .iter()
        .map(|value| DigitizeRow {
            value: value.clone(),
            outcome: digitize_datetime(value).map_err(|e| e.to_string()),
        })
        .collect()
}
