//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so limits live here.

use crate::utils::{AppError, ErrorCode};

/// Entity names: alimento nome, despesa categoria
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions: comanda observacao, despesa descricao
pub const MAX_NOTE_LEN: usize = 500;

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(
            AppError::with_message(ErrorCode::RequiredField, format!("{field} must not be empty"))
                .with_detail("field", field),
        );
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        let len = v.chars().count();
        if len > max_len {
            return Err(AppError::validation(format!(
                "{field} is too long ({len} chars, max {max_len})"
            ))
            .with_detail("field", field));
        }
    }
    Ok(())
}

/// Validate that an integer is at least `min`.
pub fn validate_min(value: i64, field: &str, min: i64) -> Result<(), AppError> {
    if value < min {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must be at least {min}, got {value}"),
        )
        .with_detail("field", field)
        .with_detail("value", value));
    }
    Ok(())
}

/// Trim an optional note, treating blank as absent.
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Arroz", "nome", MAX_NAME_LEN).is_ok());

        let err = validate_required_text("   ", "nome", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let long = "a".repeat(MAX_NAME_LEN + 1);
        let err = validate_required_text(&long, "nome", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_length_counts_chars_not_bytes() {
        // 200 two-byte chars
        let nome = "ç".repeat(MAX_NAME_LEN);
        assert!(validate_required_text(&nome, "nome", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "observacao", MAX_NOTE_LEN).is_ok());
        assert!(validate_optional_text(&Some("sem sal".into()), "observacao", MAX_NOTE_LEN).is_ok());
        let long = Some("x".repeat(MAX_NOTE_LEN + 1));
        assert!(validate_optional_text(&long, "observacao", MAX_NOTE_LEN).is_err());
    }

    #[test]
    fn test_min() {
        assert!(validate_min(0, "quantidade", 0).is_ok());
        let err = validate_min(-1, "quantidade", 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        assert_eq!(err.details.unwrap()["value"], -1);
    }

    #[test]
    fn test_normalize_optional_text() {
        assert_eq!(normalize_optional_text(Some("  ok ".into())), Some("ok".into()));
        assert_eq!(normalize_optional_text(Some("   ".into())), None);
        assert_eq!(normalize_optional_text(None), None);
    }
}
