use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Invalid stock code: must be exactly 6 digits")]
    InvalidCode,

    #[error("Stock not found: {0}")]
    NotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Data error: {0}")]
    Data(String),
}

/// Validate a 6-digit A-share ticker code.
pub fn validate_code(code: &str) -> Result<(), ReportError> {
    if code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ReportError::InvalidCode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_six_digits() {
        assert!(validate_code("600519").is_ok());
        assert!(validate_code("000001").is_ok());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(validate_code("123").is_err());
        assert!(validate_code("1234567").is_err());
        assert!(validate_code("").is_err());
    }

    #[test]
    fn rejects_non_digits() {
        assert!(validate_code("abcdef").is_err());
        assert!(validate_code("60051a").is_err());
        // Unicode digits that pass is_numeric but are not ASCII
        assert!(validate_code("６００５１９").is_err());
    }
}
