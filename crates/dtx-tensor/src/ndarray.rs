//! Contiguous typed buffers.

use crate::dtype::{DType, Device};
use crate::error::{Result, TensorError};
use crate::shape::Shape;

#[derive(Debug, Clone, PartialEq)]
enum Storage {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
    I64(Vec<i64>),
}

impl Storage {
    fn zeros(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::F32 => Storage::F32(vec![0.0; len]),
            DType::F64 => Storage::F64(vec![0.0; len]),
            DType::I32 => Storage::I32(vec![0; len]),
            DType::I64 => Storage::I64(vec![0; len]),
        }
    }

    fn len(&self) -> usize {
        match self {
            Storage::F32(v) => v.len(),
            Storage::F64(v) => v.len(),
            Storage::I32(v) => v.len(),
            Storage::I64(v) => v.len(),
        }
    }

    fn dtype(&self) -> DType {
        match self {
            Storage::F32(_) => DType::F32,
            Storage::F64(_) => DType::F64,
            Storage::I32(_) => DType::I32,
            Storage::I64(_) => DType::I64,
        }
    }
}

/// A dense, row-major tensor buffer.
///
/// Values cross the boundary as `f64` and are cast to the element type on
/// write. Integer casts saturate and map NaN to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Shape,
    device: Device,
    storage: Storage,
}

impl NdArray {
    /// Zero-initialized buffer. Callers normally go through a
    /// [`TensorAllocator`](crate::TensorAllocator) instead.
    pub fn zeros(shape: Shape, dtype: DType, device: Device) -> Result<Self> {
        let len = shape
            .checked_numel()
            .ok_or_else(|| TensorError::ShapeOverflow {
                dims: shape.dims().to_vec(),
            })?;
        Ok(Self {
            storage: Storage::zeros(dtype, len),
            shape,
            device,
        })
    }

    pub fn from_f32(shape: Shape, data: Vec<f32>) -> Result<Self> {
        check_len(&shape, data.len())?;
        Ok(Self::cpu(shape, Storage::F32(data)))
    }

    pub fn from_f64(shape: Shape, data: Vec<f64>) -> Result<Self> {
        check_len(&shape, data.len())?;
        Ok(Self::cpu(shape, Storage::F64(data)))
    }

    pub fn from_i32(shape: Shape, data: Vec<i32>) -> Result<Self> {
        check_len(&shape, data.len())?;
        Ok(Self::cpu(shape, Storage::I32(data)))
    }

    pub fn from_i64(shape: Shape, data: Vec<i64>) -> Result<Self> {
        check_len(&shape, data.len())?;
        Ok(Self::cpu(shape, Storage::I64(data)))
    }

    /// Build a buffer of the given dtype from `f64` values.
    pub fn from_values(shape: Shape, dtype: DType, values: &[f64]) -> Result<Self> {
        check_len(&shape, values.len())?;
        let mut array = Self::zeros(shape, dtype, Device::cpu())?;
        for (offset, &value) in values.iter().enumerate() {
            array.write(offset, value)?;
        }
        Ok(array)
    }

    fn cpu(shape: Shape, storage: Storage) -> Self {
        Self {
            shape,
            device: Device::cpu(),
            storage,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    pub fn device(&self) -> Device {
        self.device
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write one value at a flat row-major offset.
    pub fn write(&mut self, offset: usize, value: f64) -> Result<()> {
        let len = self.len();
        let oob = || TensorError::OutOfBounds { offset, len };
        match &mut self.storage {
            Storage::F32(v) => *v.get_mut(offset).ok_or_else(oob)? = value as f32,
            Storage::F64(v) => *v.get_mut(offset).ok_or_else(oob)? = value,
            Storage::I32(v) => *v.get_mut(offset).ok_or_else(oob)? = value as i32,
            Storage::I64(v) => *v.get_mut(offset).ok_or_else(oob)? = value as i64,
        }
        Ok(())
    }

    /// Write consecutive values starting at `offset`.
    pub fn write_slice(&mut self, offset: usize, values: &[f64]) -> Result<()> {
        for (i, &value) in values.iter().enumerate() {
            self.write(offset + i, value)?;
        }
        Ok(())
    }

    /// Read one value at a flat row-major offset.
    pub fn read(&self, offset: usize) -> Result<f64> {
        let len = self.len();
        let oob = TensorError::OutOfBounds { offset, len };
        let value = match &self.storage {
            Storage::F32(v) => v.get(offset).map(|&x| f64::from(x)),
            Storage::F64(v) => v.get(offset).copied(),
            Storage::I32(v) => v.get(offset).map(|&x| f64::from(x)),
            Storage::I64(v) => v.get(offset).map(|&x| x as f64),
        };
        value.ok_or(oob)
    }

    /// Read one value as an integer code without a float round trip.
    ///
    /// Float values have a code only when they are finite and integral.
    pub fn read_i64(&self, offset: usize) -> Result<Option<i64>> {
        let len = self.len();
        let oob = TensorError::OutOfBounds { offset, len };
        let code = match &self.storage {
            Storage::I32(v) => v.get(offset).map(|&x| Some(i64::from(x))),
            Storage::I64(v) => v.get(offset).map(|&x| Some(x)),
            Storage::F32(v) => v.get(offset).map(|&x| float_code(f64::from(x))),
            Storage::F64(v) => v.get(offset).map(|&x| float_code(x)),
        };
        code.ok_or(oob)
    }

    /// All values widened to `f64`, row-major.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        match &self.storage {
            Storage::F32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Storage::F64(v) => v.clone(),
            Storage::I32(v) => v.iter().map(|&x| f64::from(x)).collect(),
            Storage::I64(v) => v.iter().map(|&x| x as f64).collect(),
        }
    }

    pub fn as_f32_slice(&self) -> Option<&[f32]> {
        match &self.storage {
            Storage::F32(v) => Some(v),
            _ => None,
        }
    }
}

/// Integer code held by a float, if it holds one exactly.
fn float_code(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

fn check_len(shape: &Shape, actual: usize) -> Result<()> {
    let expected = shape
        .checked_numel()
        .ok_or_else(|| TensorError::ShapeOverflow {
            dims: shape.dims().to_vec(),
        })?;
    if expected != actual {
        return Err(TensorError::ShapeMismatch {
            dims: shape.dims().to_vec(),
            expected,
            actual,
        });
    }
    Ok(())
}
