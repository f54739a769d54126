//! Tensor buffer boundary for DTX.
//!
//! The data transforms never own allocation policy. They describe the buffer
//! they need (shape, element type, device) and ask a [`TensorAllocator`] for it,
//! then write values into the returned [`NdArray`].
//!
//! This crate provides:
//! - **dtype**: element types and device descriptors
//! - **shape**: tensor dimensions with overflow-checked element counts
//! - **ndarray**: a contiguous, typed, zero-initialized buffer
//! - **allocator**: the allocation trait and a CPU reference implementation
//!
//! # Example
//!
//! ```
//! use dtx_tensor::{DType, Device, HostAllocator, Shape, TensorAllocator};
//!
//! let allocator = HostAllocator::new();
//! let mut array = allocator
//!     .allocate(&Shape::new(vec![2, 3]), DType::F32, Device::cpu())
//!     .unwrap();
//! array.write(4, 1.5).unwrap();
//! assert_eq!(array.read(4).unwrap(), 1.5);
//! ```

mod allocator;
mod dtype;
mod error;
mod ndarray;
mod shape;

pub use allocator::{HostAllocator, TensorAllocator};
pub use dtype::{DType, Device, DeviceKind};
pub use error::{Result, TensorError};
pub use ndarray::NdArray;
pub use shape::Shape;
