//! Lenient string-to-number coercion for provider fields.
//!
//! The gateway reports numeric indicators as strings and uses "-" or an empty
//! string for missing values; large numbers may carry thousands separators
//! and percentages a trailing "%". Anything unparsable coerces to `None`.

/// Coerce a raw provider string to f64. `None` for blanks and dashes.
pub fn coerce_f64(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "-" || trimmed == "--" {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|c| *c != ',' && *c != '%').collect();
    cleaned.parse().ok()
}

/// Coerce a raw provider string to i64, truncating any fractional part.
pub fn coerce_i64(raw: &str) -> Option<i64> {
    coerce_f64(raw).map(|v| v as i64)
}

/// Coerce an optional raw field, as stored on provider row structs.
pub fn field_f64(raw: Option<&String>) -> Option<f64> {
    raw.and_then(|s| coerce_f64(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_numbers() {
        assert_eq!(coerce_f64("12.5"), Some(12.5));
        assert_eq!(coerce_f64("-3.2"), Some(-3.2));
        assert_eq!(coerce_f64(" 7 "), Some(7.0));
    }

    #[test]
    fn strips_separators_and_percent() {
        assert_eq!(coerce_f64("1,234.5"), Some(1234.5));
        assert_eq!(coerce_f64("12.3%"), Some(12.3));
        assert_eq!(coerce_f64("1,234,567"), Some(1_234_567.0));
    }

    #[test]
    fn blanks_and_dashes_are_none() {
        assert_eq!(coerce_f64(""), None);
        assert_eq!(coerce_f64("   "), None);
        assert_eq!(coerce_f64("-"), None);
        assert_eq!(coerce_f64("--"), None);
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(coerce_f64("N/A"), None);
        assert_eq!(coerce_f64("abc"), None);
    }

    #[test]
    fn i64_truncates() {
        assert_eq!(coerce_i64("1,234.9"), Some(1234));
        assert_eq!(coerce_i64("-"), None);
    }

    #[test]
    fn optional_field_helper() {
        let some = Some("42.0".to_string());
        assert_eq!(field_f64(some.as_ref()), Some(42.0));
        assert_eq!(field_f64(None), None);
    }
}
