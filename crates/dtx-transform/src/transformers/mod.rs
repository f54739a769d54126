//! Transformers: conversion of one input record into one numeric tensor.
//!
//! - **float**: decimal parsing with a NaN fallback
//! - **categorical**: label lookup with a `-1` fallback
//! - **datetime**: digitization into seven calendar columns, failing hard

pub mod categorical;
pub mod datetime;
pub mod float;

use dtx_tensor::{DType, Device, NdArray, Shape, TensorAllocator};
use serde_json::Value;

use crate::error::Result;
use crate::metadata::ColumnTransform;
use crate::record::Record;
use crate::registry::TransformKind;

pub use categorical::CategoricalStringTransformer;
pub use datetime::{DateTimeTransformer, NUM_DATE_TIME_COLS};
pub use float::FloatTransformer;

/// Every transformer known to the registry.
#[derive(Debug, Clone, Copy)]
pub enum Transformer {
    Float(FloatTransformer),
    CategoricalString(CategoricalStringTransformer),
    DateTime(DateTimeTransformer),
}

impl Transformer {
    pub fn kind(&self) -> TransformKind {
        match self {
            Transformer::Float(_) => TransformKind::Float,
            Transformer::CategoricalString(_) => TransformKind::CategoricalString,
            Transformer::DateTime(_) => TransformKind::DateTime,
        }
    }

    /// Shape of the tensor produced for a record of `input` shape.
    pub fn output_shape(&self, input: &Shape) -> Shape {
        match self {
            Transformer::DateTime(_) => input.with_last_dim_scaled(NUM_DATE_TIME_COLS),
            Transformer::Float(_) | Transformer::CategoricalString(_) => input.clone(),
        }
    }

    /// Allocate a zeroed tensor sized for `input`.
    pub fn init_ndarray<A>(
        &self,
        input: &Value,
        dtype: DType,
        device: Device,
        allocator: &A,
    ) -> Result<NdArray>
    where
        A: TensorAllocator + ?Sized,
    {
        let record = Record::from_json(input)?;
        let shape = self.output_shape(record.shape());
        Ok(allocator.allocate(&shape, dtype, device)?)
    }

    /// Fill `array` from `input` according to `spec`.
    pub fn map_to_ndarray(
        &self,
        input: &Value,
        spec: &ColumnTransform,
        array: &mut NdArray,
    ) -> Result<()> {
        let record = Record::from_json(input)?;
        match self {
            Transformer::Float(t) => t.map_record(&record, array),
            Transformer::CategoricalString(t) => t.map_record(&record, spec, array),
            Transformer::DateTime(t) => t.map_record(&record, array),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{CategoricalMap, LabelMap};
    use dtx_tensor::HostAllocator;
    use serde_json::json;

    fn run(transformer: Transformer, input: &Value, spec: &ColumnTransform) -> NdArray {
        let mut array = transformer
            .init_ndarray(input, DType::F32, Device::cpu(), &HostAllocator::new())
            .unwrap();
        transformer.map_to_ndarray(input, spec, &mut array).unwrap();
        array
    }

    #[test]
    fn test_float_keeps_shape() {
        let input = json!([["1.5", 2], ["x", null]]);
        let array = run(
            Transformer::Float(FloatTransformer),
            &input,
            &ColumnTransform::of_kind("Float"),
        );
        assert_eq!(array.shape().dims(), &[2, 2]);
        let values = array.to_f64_vec();
        assert_eq!(&values[..2], &[1.5, 2.0]);
        assert!(values[2].is_nan() && values[3].is_nan());
    }

    #[test]
    fn test_categorical_per_column() {
        let labels = LabelMap::from([("red".to_string(), 4.0)]);
        let spec = ColumnTransform::of_kind("CategoricalString")
            .with_map(CategoricalMap::PerColumn(vec![Some(labels), None]));
        let input = json!([["red", "0.25"], ["blue", "oops"]]);
        let array = run(
            Transformer::CategoricalString(CategoricalStringTransformer),
            &input,
            &spec,
        );
        let values = array.to_f64_vec();
        assert_eq!(values[0], 4.0);
        assert_eq!(values[1], 0.25);
        assert_eq!(values[2], -1.0);
        assert!(values[3].is_nan());
    }

    #[test]
    fn test_categorical_without_map_is_metadata_error() {
        let input = json!(["a"]);
        let transformer = Transformer::CategoricalString(CategoricalStringTransformer);
        let mut array = transformer
            .init_ndarray(&input, DType::F32, Device::cpu(), &HostAllocator::new())
            .unwrap();
        let err = transformer
            .map_to_ndarray(&input, &ColumnTransform::of_kind("CategoricalString"), &mut array)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::TransformError::InvalidMetadata { .. }
        ));
    }

    #[test]
    fn test_datetime_expands_last_dim() {
        let input = json!([["Jan 1 2024 00:00:00", "Mar 15 2023 13:45:30"]]);
        let array = run(
            Transformer::DateTime(DateTimeTransformer),
            &input,
            &ColumnTransform::of_kind("DateTime"),
        );
        assert_eq!(array.shape().dims(), &[1, 14]);
        assert_eq!(
            array.to_f64_vec(),
            vec![
                0.0, 2024.0, 0.0, 0.0, 0.0, 1.0, 1.0, //
                2.0, 2023.0, 13.0, 45.0, 30.0, 3.0, 11.0,
            ]
        );
    }

    #[test]
    fn test_datetime_scalar_record() {
        let input = json!("Jan 1 2024");
        let array = run(
            Transformer::DateTime(DateTimeTransformer),
            &input,
            &ColumnTransform::of_kind("DateTime"),
        );
        assert_eq!(array.shape().dims(), &[7]);
    }

    #[test]
    fn test_datetime_rejects_numbers() {
        let input = json!([20240101]);
        let transformer = Transformer::DateTime(DateTimeTransformer);
        let mut array = transformer
            .init_ndarray(&input, DType::F32, Device::cpu(), &HostAllocator::new())
            .unwrap();
        let err = transformer
            .map_to_ndarray(&input, &ColumnTransform::of_kind("DateTime"), &mut array)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid date/time '20240101' at element 0: expected a string value"
        );
    }
}
