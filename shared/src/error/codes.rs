//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Inventory (alimento) errors
//! - 2xxx: Order (comanda) errors
//! - 3xxx: Expense (despesa) errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so clients can switch on
/// them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request (malformed body, bad path parameter)
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Inventory ====================
    /// Alimento not found
    AlimentoNotFound = 1001,
    /// Another alimento already uses this nome
    AlimentoNomeExists = 1002,
    /// Alimento is referenced by an order and cannot be deleted
    AlimentoInUse = 1003,
    /// Not enough stock to fulfil an order line
    InsufficientStock = 1004,

    // ==================== 2xxx: Order ====================
    /// Comanda not found
    ComandaNotFound = 2001,
    /// Comanda has no items
    ComandaEmpty = 2002,

    // ==================== 3xxx: Expense ====================
    /// Despesa not found
    DespesaNotFound = 3001,
    /// Monetary amount is negative or out of range
    InvalidAmount = 3002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Store unreachable or busy, client may retry
    StoreUnavailable = 9101,
    /// Request exceeded the server's time budget
    TimeoutError = 9102,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Inventory
            ErrorCode::AlimentoNotFound => "Alimento not found",
            ErrorCode::AlimentoNomeExists => "Alimento with this nome already exists",
            ErrorCode::AlimentoInUse => "Alimento is referenced by an order",
            ErrorCode::InsufficientStock => "Insufficient stock",

            // Order
            ErrorCode::ComandaNotFound => "Comanda not found",
            ErrorCode::ComandaEmpty => "Comanda must contain at least one item",

            // Expense
            ErrorCode::DespesaNotFound => "Despesa not found",
            ErrorCode::InvalidAmount => "Invalid monetary amount",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StoreUnavailable => "Store temporarily unavailable",
            ErrorCode::TimeoutError => "Request timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Inventory
            1001 => Ok(ErrorCode::AlimentoNotFound),
            1002 => Ok(ErrorCode::AlimentoNomeExists),
            1003 => Ok(ErrorCode::AlimentoInUse),
            1004 => Ok(ErrorCode::InsufficientStock),

            // Order
            2001 => Ok(ErrorCode::ComandaNotFound),
            2002 => Ok(ErrorCode::ComandaEmpty),

            // Expense
            3001 => Ok(ErrorCode::DespesaNotFound),
            3002 => Ok(ErrorCode::InvalidAmount),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9101 => Ok(ErrorCode::StoreUnavailable),
            9102 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);
        assert_eq!(ErrorCode::AlreadyExists.code(), 4);

        assert_eq!(ErrorCode::AlimentoNotFound.code(), 1001);
        assert_eq!(ErrorCode::AlimentoNomeExists.code(), 1002);
        assert_eq!(ErrorCode::InsufficientStock.code(), 1004);

        assert_eq!(ErrorCode::ComandaNotFound.code(), 2001);
        assert_eq!(ErrorCode::DespesaNotFound.code(), 3001);

        assert_eq!(ErrorCode::InternalError.code(), 9001);
        assert_eq!(ErrorCode::StoreUnavailable.code(), 9101);
    }

    #[test]
    fn test_try_from_valid() {
        assert_eq!(ErrorCode::try_from(2), Ok(ErrorCode::ValidationFailed));
        assert_eq!(ErrorCode::try_from(1002), Ok(ErrorCode::AlimentoNomeExists));
        assert_eq!(ErrorCode::try_from(2001), Ok(ErrorCode::ComandaNotFound));
        assert_eq!(ErrorCode::try_from(9101), Ok(ErrorCode::StoreUnavailable));
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(0), Err(InvalidErrorCode(0)));
        assert_eq!(ErrorCode::try_from(42), Err(InvalidErrorCode(42)));
        assert_eq!(ErrorCode::try_from(4001), Err(InvalidErrorCode(4001)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::DespesaNotFound).unwrap();
        assert_eq!(json, "3001");
    }

    #[test]
    fn test_deserialize() {
        let code: ErrorCode = serde_json::from_str("1004").unwrap();
        assert_eq!(code, ErrorCode::InsufficientStock);
    }

    #[test]
    fn test_deserialize_invalid() {
        let result: Result<ErrorCode, _> = serde_json::from_str("12345");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCode::AlimentoNotFound.to_string(), "1001");
        assert_eq!(InvalidErrorCode(7).to_string(), "invalid error code: 7");
    }
}
