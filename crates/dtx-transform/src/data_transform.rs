//! Orchestration of input and output transforms.

use std::collections::HashMap;

use dtx_tensor::{DType, Device, NdArray, Shape, TensorAllocator};
use serde_json::Value;
use tracing::{debug, debug_span, trace};

use crate::error::{Result, TransformError};
use crate::metadata::{self, ColumnTransform};
use crate::record::Record;
use crate::registry;
use crate::transformers::float::leaf_to_float;

/// Label written for output codes missing from the mapping.
pub const UNKNOWN_LABEL: &str = "<unseen_label>";

/// Converts model inputs and outputs according to metadata.
///
/// Holds the transformed output of each output index until it is
/// overwritten by the next [`transform_output`](Self::transform_output) for
/// that index. There is no internal locking; hosts sharing one instance
/// across threads must wrap it themselves.
#[derive(Debug, Default)]
pub struct DataTransform {
    transformed_outputs: HashMap<usize, String>,
}

impl DataTransform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the input requires a data transform.
    pub fn has_input_transform(metadata: &Value) -> bool {
        metadata::has_input_transform(metadata)
    }

    /// Returns true if output `index` requires a data transform.
    pub fn has_output_transform(metadata: &Value, index: usize) -> bool {
        metadata::has_output_transform(metadata, index)
    }

    /// Transform a raw character buffer holding JSON text.
    ///
    /// `shape` describes `input` as a 1-D character tensor; its element count
    /// may not exceed the buffer. Trailing NUL bytes are ignored.
    pub fn transform_input<A>(
        &self,
        metadata: &Value,
        shape: &[i64],
        input: &[u8],
        dtypes: &[DType],
        device: Device,
        allocator: &A,
    ) -> Result<Vec<NdArray>>
    where
        A: TensorAllocator + ?Sized,
    {
        let json = get_as_json(shape, input)?;
        self.transform_input_json(metadata, &json, dtypes, device, allocator)
    }

    /// Transform an already-parsed JSON input.
    ///
    /// Produces one tensor per column transform, in declaration order. With
    /// several column transforms, `input` must be an array holding one record
    /// per transform.
    pub fn transform_input_json<A>(
        &self,
        metadata: &Value,
        input: &Value,
        dtypes: &[DType],
        device: Device,
        allocator: &A,
    ) -> Result<Vec<NdArray>>
    where
        A: TensorAllocator + ?Sized,
    {
        let span = debug_span!("transform_input");
        let _guard = span.enter();

        let transforms = metadata::input_transforms(metadata)?;
        let columns = &transforms.column_transform;
        let records = split_records(input, columns.len())?;

        let mut tensors = Vec::with_capacity(columns.len());
        for (field, (spec, record)) in columns.iter().zip(records).enumerate() {
            let dtype = dtypes
                .get(field)
                .copied()
                .ok_or_else(|| TransformError::InvalidInput {
                    reason: format!("no dtype supplied for column transform {field}"),
                })?;
            let array = transform_column(field, spec, record, dtype, device, allocator)
                .map_err(|e| e.in_field(field))?;
            debug!(field, shape = %array.shape(), dtype = %dtype, "transformed input");
            tensors.push(array);
        }
        Ok(tensors)
    }

    /// Map integer codes in `output` back to labels and cache the JSON text.
    ///
    /// Rank 1 tensors become an array of labels, rank 2 tensors an array of
    /// rows. Codes without a label, and float values that are not whole
    /// numbers, become [`UNKNOWN_LABEL`].
    pub fn transform_output(
        &mut self,
        metadata: &Value,
        index: usize,
        output: &NdArray,
    ) -> Result<()> {
        let mapping = metadata::output_mapping(metadata, index)?;
        let json = match *output.shape().dims() {
            [len] => Value::Array(labels(&mapping, output, 0, len)?),
            [rows, cols] => Value::Array(
                (0..rows)
                    .map(|r| labels(&mapping, output, r * cols, cols).map(Value::Array))
                    .collect::<Result<Vec<_>>>()?,
            ),
            _ => {
                return Err(TransformError::UnsupportedRank {
                    rank: output.ndim(),
                });
            }
        };
        let text = json.to_string();
        debug!(index, bytes = text.len(), "cached transformed output");
        self.transformed_outputs.insert(index, text);
        Ok(())
    }

    fn transformed(&self, index: usize) -> Result<&String> {
        self.transformed_outputs
            .get(&index)
            .ok_or(TransformError::OutputNotTransformed { index })
    }

    /// Shape of the transformed output: a 1-D character tensor.
    pub fn output_shape(&self, index: usize) -> Result<Vec<i64>> {
        let (size, _) = self.output_size_dim(index)?;
        Ok(vec![size])
    }

    /// Element count and rank of the transformed output.
    pub fn output_size_dim(&self, index: usize) -> Result<(i64, usize)> {
        let text = self.transformed(index)?;
        let size = i64::try_from(text.len()).unwrap_or(i64::MAX);
        Ok((size, 1))
    }

    /// Copy the transformed output into `dst`, returning the bytes written.
    pub fn copy_output(&self, index: usize, dst: &mut [u8]) -> Result<usize> {
        let bytes = self.output_bytes(index)?;
        let Some(target) = dst.get_mut(..bytes.len()) else {
            return Err(TransformError::BufferTooSmall {
                index,
                required: bytes.len(),
                provided: dst.len(),
            });
        };
        target.copy_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Borrowed view of the transformed output.
    ///
    /// The borrow ends before the next `transform_output` can run.
    pub fn output_bytes(&self, index: usize) -> Result<&[u8]> {
        self.transformed(index).map(String::as_bytes)
    }

    pub fn output_str(&self, index: usize) -> Result<&str> {
        self.transformed(index).map(String::as_str)
    }
}

/// Read a 1-D character buffer as JSON.
fn get_as_json(shape: &[i64], input: &[u8]) -> Result<Value> {
    let shape = Shape::from_i64(shape).map_err(|e| TransformError::InvalidInput {
        reason: e.to_string(),
    })?;
    if shape.ndim() != 1 {
        return Err(TransformError::InvalidInput {
            reason: format!("expected a 1-D character input, got shape {shape}"),
        });
    }
    let len = shape.numel();
    let bytes = input.get(..len).ok_or_else(|| TransformError::InvalidInput {
        reason: format!("shape {shape} exceeds input of {} bytes", input.len()),
    })?;
    let end = bytes.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    let text = std::str::from_utf8(&bytes[..end]).map_err(|e| TransformError::InvalidInput {
        reason: format!("input is not UTF-8: {e}"),
    })?;
    serde_json::from_str(text).map_err(|e| TransformError::InvalidInput {
        reason: format!("input is not valid JSON: {e}"),
    })
}

fn split_records(input: &Value, count: usize) -> Result<Vec<&Value>> {
    if count == 1 {
        return Ok(vec![input]);
    }
    match input {
        Value::Array(records) if records.len() == count => Ok(records.iter().collect()),
        _ => Err(TransformError::InvalidInput {
            reason: format!("expected an array of {count} input records"),
        }),
    }
}

fn transform_column<A>(
    field: usize,
    spec: &ColumnTransform,
    record: &Value,
    dtype: DType,
    device: Device,
    allocator: &A,
) -> Result<NdArray>
where
    A: TensorAllocator + ?Sized,
{
    let Some(kind) = spec.kind.as_deref() else {
        debug!(field, "no transformer configured, casting values");
        return passthrough(record, dtype, device, allocator);
    };
    let transformer = registry::lookup(kind).ok_or_else(|| TransformError::UnknownTransformer {
        field,
        kind: kind.to_string(),
    })?;
    let mut array = transformer.init_ndarray(record, dtype, device, allocator)?;
    transformer.map_to_ndarray(record, spec, &mut array)?;
    Ok(array)
}

/// Cast numeric leaves straight into a tensor of the record's shape.
fn passthrough<A>(record: &Value, dtype: DType, device: Device, allocator: &A) -> Result<NdArray>
where
    A: TensorAllocator + ?Sized,
{
    let record = Record::from_json(record)?;
    let mut array = allocator.allocate(record.shape(), dtype, device)?;
    for (element, leaf) in record.leaves() {
        let value = match leaf {
            Value::Number(_) | Value::Bool(_) => leaf_to_float(leaf),
            _ => None,
        }
        .ok_or_else(|| TransformError::InvalidInput {
            reason: format!("element {element} is not numeric"),
        })?;
        array.write(element, value)?;
    }
    Ok(array)
}

fn labels(
    mapping: &HashMap<i64, String>,
    output: &NdArray,
    start: usize,
    len: usize,
) -> Result<Vec<Value>> {
    (start..start + len)
        .map(|offset| {
            let code = output.read_i64(offset)?;
            let label = code
                .and_then(|c| mapping.get(&c))
                .map_or(UNKNOWN_LABEL, String::as_str);
            if label == UNKNOWN_LABEL {
                trace!(offset, "code has no label");
            }
            Ok(Value::String(label.to_string()))
        })
        .collect()
}
