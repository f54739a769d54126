//! Tensor dimensions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TensorError};

/// Row-major tensor shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape(Vec<usize>);

impl Shape {
    pub fn new(dims: Vec<usize>) -> Self {
        Self(dims)
    }

    /// Build a shape from signed dimensions, as handed over by C-style callers.
    pub fn from_i64(dims: &[i64]) -> Result<Self> {
        dims.iter()
            .enumerate()
            .map(|(axis, &value)| {
                usize::try_from(value).map_err(|_| TensorError::NegativeDimension { axis, value })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn dims(&self) -> &[usize] {
        &self.0
    }

    pub fn ndim(&self) -> usize {
        self.0.len()
    }

    /// Total element count, or `None` on overflow.
    pub fn checked_numel(&self) -> Option<usize> {
        self.0.iter().try_fold(1usize, |acc, &d| acc.checked_mul(d))
    }

    /// Total element count. Saturates on overflow; allocation rejects such shapes.
    pub fn numel(&self) -> usize {
        self.checked_numel().unwrap_or(usize::MAX)
    }

    /// Copy of this shape with the last dimension multiplied by `factor`.
    ///
    /// A rank-0 shape is treated as a single element and becomes `[factor]`.
    pub fn with_last_dim_scaled(&self, factor: usize) -> Self {
        let mut dims = self.0.clone();
        match dims.last_mut() {
            Some(last) => *last = last.saturating_mul(factor),
            None => dims.push(factor),
        }
        Self(dims)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(dims: Vec<usize>) -> Self {
        Self(dims)
    }
}

impl From<&[usize]> for Shape {
    fn from(dims: &[usize]) -> Self {
        Self(dims.to_vec())
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numel() {
        assert_eq!(Shape::new(vec![2, 3, 4]).numel(), 24);
        assert_eq!(Shape::new(vec![]).numel(), 1);
        assert_eq!(Shape::new(vec![5, 0]).numel(), 0);
    }

    #[test]
    fn test_overflow_detected() {
        let shape = Shape::new(vec![usize::MAX, 2]);
        assert_eq!(shape.checked_numel(), None);
    }

    #[test]
    fn test_last_dim_scaled() {
        assert_eq!(
            Shape::new(vec![2, 3]).with_last_dim_scaled(7),
            Shape::new(vec![2, 21])
        );
        assert_eq!(Shape::new(vec![4]).with_last_dim_scaled(7).dims(), &[28]);
        assert_eq!(Shape::new(vec![]).with_last_dim_scaled(7).dims(), &[7]);
    }

    #[test]
    fn test_from_i64_rejects_negative() {
        assert_eq!(Shape::from_i64(&[3, 4]).unwrap().dims(), &[3, 4]);
        assert_eq!(
            Shape::from_i64(&[3, -1]),
            Err(TensorError::NegativeDimension { axis: 1, value: -1 })
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Shape::new(vec![2, 7]).to_string(), "[2, 7]");
    }
}
