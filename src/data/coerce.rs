//! Text-to-number coercion with null-on-failure semantics.
//!
//! Nothing in here returns an error: a value that cannot be read as the
//! column's type becomes `None` and the caller decides whether the row
//! survives.

/// Tokens treated as a missing value, in addition to an empty field.
pub const NA_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Check whether a raw field counts as missing.
pub fn is_missing(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty() || NA_MARKERS.contains(&trimmed)
}

/// Coerce a raw field to an integer.
///
/// Accepts plain integers and integral floats (`"15.0"`, `"1e3"`) that fit
/// in an `i64`. Fractional values, NaN, infinities and text yield `None`.
pub fn coerce_int(raw: &str) -> Option<i64> {
    if is_missing(raw) {
        return None;
    }
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Some(v);
    }
    let v = trimmed.parse::<f64>().ok()?;
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Coerce a raw field to a float. NaN yields `None`; infinities are kept.
pub fn coerce_float(raw: &str) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Render a float for output.
///
/// Integral values keep one decimal (`2.0`) so a float column never reads
/// back as an integer column; everything else uses the shortest
/// representation that parses back to the same value.
pub fn format_float(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}
