//! Error types for data transforms.

use dtx_tensor::TensorError;
use thiserror::Error;

/// Why a date/time string could not be digitized.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DateTimeErrorKind {
    #[error("expected a string value")]
    NotAString,

    #[error("expected 3 or 6 date/time fields, found {tokens}")]
    Malformed { tokens: usize },

    #[error("'{token}' is not a number")]
    InvalidNumber { token: String },

    #[error("unknown month '{token}'")]
    UnknownMonth { token: String },

    #[error("year {year} is outside 1..=9999")]
    YearOutOfRange { year: i64 },

    #[error("day {day} does not exist in {year}-{month:02}")]
    DayOutOfRange { year: i64, month: i64, day: i64 },

    #[error("time {hour:02}:{minute:02}:{second:02} is out of range")]
    TimeOutOfRange { hour: i64, minute: i64, second: i64 },
}

/// Errors that can occur while transforming inputs or outputs.
///
/// Value-level problems in Float and CategoricalString columns never show up
/// here; those resolve to sentinels.
#[derive(Debug, Error)]
pub enum TransformError {
    // === Metadata Errors ===
    /// `DataTransform.Input.ColumnTransform` is absent.
    #[error("metadata has no input transform")]
    MissingInputTransform,

    /// `DataTransform.Output.<index>` is absent.
    #[error("metadata has no output transform for output {index}")]
    MissingOutputTransform { index: usize },

    /// A transform section exists but cannot be interpreted.
    #[error("invalid metadata at {path}: {reason}")]
    InvalidMetadata { path: String, reason: String },

    /// A column transform names a kind with no registered transformer.
    #[error("unknown transformer type '{kind}' for column transform {field}")]
    UnknownTransformer { field: usize, kind: String },

    // === Input Errors ===
    /// Raw input could not be read as a record batch.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Tensor or record has a rank the transform cannot handle.
    #[error("unsupported rank {rank}")]
    UnsupportedRank { rank: usize },

    /// A date/time value failed to digitize.
    #[error("invalid date/time '{value}' at element {element}: {reason}")]
    DateTime {
        element: usize,
        value: String,
        #[source]
        reason: DateTimeErrorKind,
    },

    /// Failure inside one column transform, tagged with its position.
    #[error("column transform {field}: {source}")]
    Field {
        field: usize,
        #[source]
        source: Box<TransformError>,
    },

    // === Caller Contract Errors ===
    /// No output has been transformed for this index yet.
    #[error("output {index} has not been transformed")]
    OutputNotTransformed { index: usize },

    /// Destination buffer cannot hold the transformed output.
    #[error("output {index} needs {required} bytes but the buffer holds {provided}")]
    BufferTooSmall {
        index: usize,
        required: usize,
        provided: usize,
    },

    // === Tensor Errors ===
    #[error(transparent)]
    Tensor(#[from] TensorError),
}

impl TransformError {
    /// Tag this error with the column transform it came from.
    ///
    /// Allocation failures pass through unchanged.
    pub(crate) fn in_field(self, field: usize) -> Self {
        match self {
            TransformError::Tensor(_) | TransformError::Field { .. } => self,
            other => TransformError::Field {
                field,
                source: Box::new(other),
            },
        }
    }

    /// The error beneath any field tagging.
    pub fn innermost(&self) -> &TransformError {
        match self {
            TransformError::Field { source, .. } => source.innermost(),
            other => other,
        }
    }

    /// True for misuse of the output accessors, as opposed to bad data.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self.innermost(),
            TransformError::OutputNotTransformed { .. } | TransformError::BufferTooSmall { .. }
        )
    }
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;
