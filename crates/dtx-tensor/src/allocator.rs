//! Buffer allocation.

use tracing::trace;

use crate::dtype::{DType, Device};
use crate::error::{Result, TensorError};
use crate::ndarray::NdArray;
use crate::shape::Shape;

/// Source of zero-initialized tensor buffers.
///
/// Implemented by the host runtime. Transforms call it once per produced
/// tensor and propagate any failure unchanged.
pub trait TensorAllocator {
    fn allocate(&self, shape: &Shape, dtype: DType, device: Device) -> Result<NdArray>;
}

impl<A: TensorAllocator + ?Sized> TensorAllocator for &A {
    fn allocate(&self, shape: &Shape, dtype: DType, device: Device) -> Result<NdArray> {
        (**self).allocate(shape, dtype, device)
    }
}

/// Allocates buffers in host memory.
///
/// Only CPU devices are accepted. An optional element limit caps the size of
/// any single buffer.
#[derive(Debug, Clone, Default)]
pub struct HostAllocator {
    max_elements: Option<usize>,
}

impl HostAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse buffers holding more than `max` elements.
    #[must_use]
    pub fn with_max_elements(mut self, max: usize) -> Self {
        self.max_elements = Some(max);
        self
    }

    pub fn max_elements(&self) -> Option<usize> {
        self.max_elements
    }
}

impl TensorAllocator for HostAllocator {
    fn allocate(&self, shape: &Shape, dtype: DType, device: Device) -> Result<NdArray> {
        if !device.is_cpu() {
            return Err(TensorError::UnsupportedDevice { device });
        }
        let elements = shape
            .checked_numel()
            .ok_or_else(|| TensorError::ShapeOverflow {
                dims: shape.dims().to_vec(),
            })?;
        if let Some(limit) = self.max_elements
            && elements > limit
        {
            return Err(TensorError::AllocationFailed {
                elements,
                reason: format!("exceeds host limit of {limit} elements"),
            });
        }
        trace!(%shape, %dtype, %device, elements, "allocating host buffer");
        NdArray::zeros(shape.clone(), dtype, device)
    }
}
