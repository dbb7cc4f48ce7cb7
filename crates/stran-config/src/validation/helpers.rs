//! Shared range-validation helpers.

/// Push an error if `value` is outside `[min, max]` (unsigned).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u64, min: u64, max: u64) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is outside `[min, max]` (signed).
pub(crate) fn validate_range_i32(
    errors: &mut Vec<String>,
    name: &str,
    value: i32,
    min: i32,
    max: i32,
) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}
