//! Error types for tensor allocation and buffer access.

use thiserror::Error;

use crate::dtype::Device;

/// Errors raised by the tensor boundary.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TensorError {
    // === Allocation Errors ===
    /// The allocator refused or could not satisfy the request.
    #[error("failed to allocate {elements} elements: {reason}")]
    AllocationFailed { elements: usize, reason: String },

    /// The element count of a shape does not fit in memory addressing.
    #[error("shape {dims:?} overflows the addressable element count")]
    ShapeOverflow { dims: Vec<usize> },

    /// The allocator cannot place buffers on the requested device.
    #[error("device {device} is not supported by this allocator")]
    UnsupportedDevice { device: Device },

    // === Shape Errors ===
    /// A dimension was negative.
    #[error("invalid dimension {value} at axis {axis}")]
    NegativeDimension { axis: usize, value: i64 },

    /// Supplied data does not match the declared shape.
    #[error("shape {dims:?} holds {expected} elements but {actual} were supplied")]
    ShapeMismatch {
        dims: Vec<usize>,
        expected: usize,
        actual: usize,
    },

    // === Access Errors ===
    /// Read or write past the end of the buffer.
    #[error("offset {offset} is out of bounds for buffer of length {len}")]
    OutOfBounds { offset: usize, len: usize },
}

/// Result type for tensor operations.
pub type Result<T> = std::result::Result<T, TensorError>;
