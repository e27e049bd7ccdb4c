//! Structural result comparison: deep equality that ignores container
//! ordering and tolerates small numeric drift.

use serde_json::Value;

/// Two numbers compare equal when closer than this.
const EPSILON: f64 = 1e-4;
/// Numbers are also rounded to this many significant digits before comparing.
const SIGNIFICANT_DIGITS: i32 = 4;

/// Deep structural equality between an actual and an expected value.
pub fn values_match(actual: &Value, expected: &Value) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => numbers_match(a, b),
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => arrays_match(a, b),
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, actual_value)| {
                    b.get(key)
                        .is_some_and(|expected_value| values_match(actual_value, expected_value))
                })
        }
        _ => actual == expected,
    }
}

fn numbers_match(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON || round_significant(a) == round_significant(b)
}

fn round_significant(x: f64) -> f64 {
    if x == 0.0 || !x.is_finite() {
        return x;
    }
    let magnitude = x.abs().log10().floor() as i32;
    let factor = 10f64.powi(SIGNIFICANT_DIGITS - 1 - magnitude);
    (x * factor).round() / factor
}

/// Order-insensitive multiset matching: every element of `actual` must pair
/// with a distinct, structurally equal element of `expected`.
fn arrays_match(actual: &[Value], expected: &[Value]) -> bool {
    if actual.len() != expected.len() {
        return false;
    }
    let mut used = vec![false; expected.len()];
    'outer: for a in actual {
        for (idx, e) in expected.iter().enumerate() {
            if !used[idx] && values_match(a, e) {
                used[idx] = true;
                continue 'outer;
            }
        }
        return false;
    }
    true
}
