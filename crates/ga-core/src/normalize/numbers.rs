use serde_json::Value;

/// Integer ≥ 0 from a JSON number or numeric string.
pub(super) fn non_negative(value: &Value) -> Option<u64> {
    let n = numeric(value)?;
    (n.is_finite() && n >= 0.0).then(|| n.floor() as u64)
}

/// Integer ≥ 1 from a JSON number or numeric string.
pub(super) fn positive(value: &Value) -> Option<u64> {
    non_negative(value).filter(|n| *n >= 1)
}

/// A JSON number or a numeric string.
pub fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}
