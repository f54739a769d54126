//! Tests for input transforms driven through `DataTransform`.

use dtx_tensor::{DType, Device, HostAllocator, NdArray, Shape, TensorAllocator, TensorError};
use dtx_transform::{DataTransform, DateTimeErrorKind, TransformError};
use serde_json::{Value, json};

fn run_raw(metadata: &Value, input: &str, dtypes: &[DType]) -> Result<Vec<NdArray>, TransformError> {
    let bytes = input.as_bytes();
    DataTransform::new().transform_input(
        metadata,
        &[bytes.len() as i64],
        bytes,
        dtypes,
        Device::cpu(),
        &HostAllocator::new(),
    )
}

fn single(transform: Value) -> Value {
    json!({"DataTransform": {"Input": {"ColumnTransform": [transform]}}})
}

#[test]
fn has_input_transform_checks_presence_only() {
    assert!(DataTransform::has_input_transform(&single(json!({"Type": "Whatever"}))));
    assert!(!DataTransform::has_input_transform(&json!({"DataTransform": {"Output": {}}})));
}

#[test]
fn float_column_from_raw_bytes() {
    let tensors = run_raw(
        &single(json!({"Type": "Float"})),
        r#"[["1.5", "-2"], ["abc", 4]]"#,
        &[DType::F32],
    )
    .unwrap();
    assert_eq!(tensors.len(), 1);
    let values = tensors[0].as_f32_slice().unwrap();
    assert_eq!(tensors[0].shape().dims(), &[2, 2]);
    assert_eq!(values[0], 1.5);
    assert_eq!(values[1], -2.0);
    assert!(values[2].is_nan());
    assert_eq!(values[3], 4.0);
}

#[test]
fn categorical_column_uses_sentinel() {
    let metadata = single(json!({
        "Type": "CategoricalString",
        "Map": {"apple": 0, "banana": 1, "cherry": 2}
    }));
    let tensors = run_raw(&metadata, r#"["cherry", "Apple", "banana"]"#, &[DType::F32]).unwrap();
    assert_eq!(tensors[0].to_f64_vec(), vec![2.0, -1.0, 1.0]);
}

#[test]
fn datetime_column_expands_to_seven() {
    let metadata = single(json!({"Type": "DateTime"}));
    let tensors = run_raw(
        &metadata,
        r#"[["Jan 1 2024 00:00:00"], ["Feb 29 2000 12:30:15"]]"#,
        &[DType::F32],
    )
    .unwrap();
    assert_eq!(tensors[0].shape().dims(), &[2, 7]);
    assert_eq!(
        tensors[0].to_f64_vec(),
        vec![
            0.0, 2024.0, 0.0, 0.0, 0.0, 1.0, 1.0, //
            1.0, 2000.0, 12.0, 30.0, 15.0, 2.0, 9.0,
        ]
    );
}

#[test]
fn datetime_failure_names_field_and_element() {
    let metadata = json!({"DataTransform": {"Input": {"ColumnTransform": [
        {"Type": "Float"},
        {"Type": "DateTime"}
    ]}}});
    let input = json!([["1"], ["Jan 1 2024", "Foo 1 2024 00:00:00"]]);
    let err = DataTransform::new()
        .transform_input_json(
            &metadata,
            &input,
            &[DType::F32, DType::F32],
            Device::cpu(),
            &HostAllocator::new(),
        )
        .unwrap_err();

    let TransformError::Field { field, source } = &err else {
        panic!("expected field error, got {err:?}");
    };
    assert_eq!(*field, 1);
    assert!(matches!(
        source.as_ref(),
        TransformError::DateTime {
            element: 1,
            reason: DateTimeErrorKind::UnknownMonth { .. },
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "column transform 1: invalid date/time 'Foo 1 2024 00:00:00' at element 1: unknown month 'Foo'"
    );
}

#[test]
fn multiple_inputs_in_declaration_order() {
    let metadata = json!({"DataTransform": {"Input": {"ColumnTransform": [
        {"Type": "CategoricalString", "Map": {"m": 0, "f": 1}},
        {"Type": "DateTime"},
        {}
    ]}}});
    let input = json!([["f", "m"], ["Mar 15 2023"], [[1, 2], [3, 4]]]);
    let tensors = DataTransform::new()
        .transform_input_json(
            &metadata,
            &input,
            &[DType::F32, DType::F64, DType::I64],
            Device::cpu(),
            &HostAllocator::new(),
        )
        .unwrap();

    assert_eq!(tensors.len(), 3);
    assert_eq!(tensors[0].to_f64_vec(), vec![1.0, 0.0]);
    assert_eq!(tensors[1].dtype(), DType::F64);
    assert_eq!(tensors[1].shape().dims(), &[7]);
    assert_eq!(tensors[2].dtype(), DType::I64);
    assert_eq!(tensors[2].shape().dims(), &[2, 2]);
    assert_eq!(tensors[2].to_f64_vec(), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn passthrough_rejects_strings() {
    let err = run_raw(&single(json!({})), r#"[1, "two"]"#, &[DType::F32]).unwrap_err();
    assert!(matches!(
        err.innermost(),
        TransformError::InvalidInput { .. }
    ));
    assert_eq!(
        err.to_string(),
        "column transform 0: invalid input: element 1 is not numeric"
    );
}

#[test]
fn unknown_transformer_type() {
    let err = run_raw(&single(json!({"Type": "Bucketize"})), "[1]", &[DType::F32]).unwrap_err();
    assert!(matches!(
        err.innermost(),
        TransformError::UnknownTransformer { field: 0, kind } if kind == "Bucketize"
    ));
}

#[test]
fn missing_dtype_is_reported() {
    let err = run_raw(&single(json!({"Type": "Float"})), "[1]", &[]).unwrap_err();
    assert!(matches!(err, TransformError::InvalidInput { .. }));
}

#[test]
fn wrong_record_count() {
    let metadata = json!({"DataTransform": {"Input": {"ColumnTransform": [
        {"Type": "Float"}, {"Type": "Float"}
    ]}}});
    let err = run_raw(&metadata, "[[1]]", &[DType::F32, DType::F32]).unwrap_err();
    assert_eq!(err.to_string(), "invalid input: expected an array of 2 input records");
}

#[test]
fn missing_input_transform() {
    let err = run_raw(&json!({}), "[1]", &[DType::F32]).unwrap_err();
    assert!(matches!(err, TransformError::MissingInputTransform));
}

#[test]
fn allocation_failure_propagates_unchanged() {
    let allocator = HostAllocator::new().with_max_elements(6);
    let err = DataTransform::new()
        .transform_input_json(
            &single(json!({"Type": "DateTime"})),
            &json!(["Jan 1 2024"]),
            &[DType::F32],
            Device::cpu(),
            &allocator,
        )
        .unwrap_err();
    assert!(matches!(
        err,
        TransformError::Tensor(TensorError::AllocationFailed { elements: 7, .. })
    ));
}

#[test]
fn allocator_trait_object() {
    let allocator: Box<dyn TensorAllocator> = Box::new(HostAllocator::new());
    let tensors = DataTransform::new()
        .transform_input_json(
            &single(json!({"Type": "Float"})),
            &json!("3.25"),
            &[DType::F64],
            Device::cpu(),
            allocator.as_ref(),
        )
        .unwrap();
    assert_eq!(tensors[0].shape(), &Shape::new(vec![1]));
    assert_eq!(tensors[0].read(0).unwrap(), 3.25);
}

#[test]
fn unsupported_device_propagates() {
    let err = DataTransform::new()
        .transform_input_json(
            &single(json!({"Type": "Float"})),
            &json!([1]),
            &[DType::F32],
            Device::gpu(0),
            &HostAllocator::new(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        TransformError::Tensor(TensorError::UnsupportedDevice { .. })
    ));
}
