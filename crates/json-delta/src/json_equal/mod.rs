//! Structural equality for JSON values.
//!
//! Objects compare by key set and per-key value regardless of key order;
//! arrays compare element-wise in order. The two entry points differ only in
//! how numbers compare: [`deep_equal`] by numeric value, as the `test`
//! operation requires, and [`identical`] by `serde_json::Number`
//! representation, so `1` and `1.0` stay distinct.

use serde_json::{Number, Value};

/// Performs a deep equality check between two JSON values, comparing numbers
/// by value.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use json_delta::json_equal::deep_equal;
///
/// assert!(deep_equal(&json!({"a": 1, "b": [1, 2]}), &json!({"b": [1, 2], "a": 1})));
/// assert!(deep_equal(&json!([1]), &json!([1.0])));
/// assert!(!deep_equal(&json!([1, 2]), &json!([2, 1])));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    equal_with(a, b, numbers_equal)
}

/// Like [`deep_equal`], but numbers must also share their representation.
/// The differ uses this so a `1` to `1.0` change is still reported.
pub fn identical(a: &Value, b: &Value) -> bool {
    equal_with(a, b, |x, y| x == y)
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if a.is_f64() || b.is_f64() {
        return a.as_f64() == b.as_f64();
    }
    // A negative integer against one above i64::MAX.
    false
}

fn equal_with(a: &Value, b: &Value, numbers: fn(&Number, &Number) -> bool) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(arr_a), Value::Array(arr_b)) => {
            arr_a.len() == arr_b.len()
                && arr_a.iter().zip(arr_b).all(|(x, y)| equal_with(x, y, numbers))
        }
        (Value::Object(obj_a), Value::Object(obj_b)) => {
            obj_a.len() == obj_b.len()
                && obj_a.iter().all(|(key, val_a)| {
                    obj_b.get(key).is_some_and(|val_b| equal_with(val_a, val_b, numbers))
                })
        }
        (
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Array(_)
            | Value::Object(_),
            _,
        ) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_equal_scalars() {
        assert!(deep_equal(&json!(null), &json!(null)));
        assert!(deep_equal(&json!(true), &json!(true)));
        assert!(deep_equal(&json!(1), &json!(1)));
        assert!(deep_equal(&json!(3.21), &json!(3.21)));
        assert!(deep_equal(&json!("x"), &json!("x")));
    }

    #[test]
    fn test_unequal_scalars() {
        assert!(!deep_equal(&json!(1), &json!(2)));
        assert!(!deep_equal(&json!("1"), &json!(1)));
        assert!(!deep_equal(&json!(false), &json!(null)));
        assert!(!deep_equal(&json!(0), &json!(false)));
    }

    #[test]
    fn test_kind_mismatch() {
        assert!(!deep_equal(&json!([]), &json!({})));
        assert!(!deep_equal(&json!(1), &json!([1])));
    }

    #[test]
    fn test_object_key_order_ignored() {
        let a: Value = serde_json::from_str(r#"{"x": 1, "y": {"p": 1, "q": 2}}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"y": {"q": 2, "p": 1}, "x": 1}"#).unwrap();
        assert!(deep_equal(&a, &b));
    }

    #[test]
    fn test_object_extra_key() {
        assert!(!deep_equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
        assert!(!deep_equal(&json!({"a": 1, "b": 2}), &json!({"a": 1, "c": 2})));
    }

    #[test]
    fn test_array_order_matters() {
        assert!(deep_equal(&json!([1, [2, 3]]), &json!([1, [2, 3]])));
        assert!(!deep_equal(&json!([1, [2, 3]]), &json!([1, [3, 2]])));
        assert!(!deep_equal(&json!([1]), &json!([1, 1])));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(deep_equal(&json!(1), &json!(1.0)));
        assert!(deep_equal(&json!({"n": [0]}), &json!({"n": [0.0]})));
        assert!(deep_equal(&json!(u64::MAX), &json!(u64::MAX)));
        assert!(!deep_equal(&json!(-1), &json!(u64::MAX)));
        assert!(!deep_equal(&json!(1), &json!(1.5)));
    }

    #[test]
    fn test_identical_keeps_number_representation() {
        assert!(!identical(&json!(1), &json!(1.0)));
        assert!(!identical(&json!([1]), &json!([1.0])));
        assert!(identical(&json!({"a": 1.5, "b": 2}), &json!({"b": 2, "a": 1.5})));
    }
}
