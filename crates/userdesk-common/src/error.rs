//! Error types shared across userdesk crates

use thiserror::Error;

/// Result type alias for shared operations
pub type Result<T> = std::result::Result<T, CommonError>;

/// Error for settings read from the environment
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Invalid value '{value}' for {field}")]
    InvalidValue { field: &'static str, value: String },
}

impl CommonError {
    /// Create an invalid value error for a named setting
    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}

/// Parse a boolean flag the way environment variables are usually written
///
/// Accepts `true/false`, `1/0`, `yes/no` and `on/off`, case-insensitively.
pub fn parse_flag(field: &'static str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(CommonError::invalid_value(field, value)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_accepts_common_spellings() {
        assert!(parse_flag("x", "true").unwrap());
        assert!(parse_flag("x", "YES").unwrap());
        assert!(parse_flag("x", " 1 ").unwrap());
        assert!(!parse_flag("x", "off").unwrap());
        assert!(!parse_flag("x", "False").unwrap());
    }

    #[test]
    fn test_parse_flag_rejects_garbage() {
        let err = parse_flag("USERDESK_NORMALIZE_EMPTY", "maybe").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid value 'maybe' for USERDESK_NORMALIZE_EMPTY"
        );
    }
}
