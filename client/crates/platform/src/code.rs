//! Clear Text Code Handling
//!
//! Handling of the short numeric local secret with:
//! - Zeroization of sensitive data
//! - Constant-time comparison
//! - Digit/length policy validation
//!
//! ## Security Features
//! - Zeroization prevents memory inspection attacks
//! - Debug output is redacted
//! - No `Clone` implementation to prevent accidental copies

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::constant_time_eq;

// ============================================================================
// Constants
// ============================================================================

/// Minimum accepted code length across all configurations
pub const MIN_CODE_LENGTH: usize = 4;

/// Maximum accepted code length across all configurations
pub const MAX_CODE_LENGTH: usize = 8;

// ============================================================================
// Error Types
// ============================================================================

/// Code policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodePolicyError {
    /// Code has the wrong number of digits
    #[error("Code must be exactly {expected} digits (got {actual})")]
    WrongLength { expected: usize, actual: usize },

    /// Code contains something other than decimal digits
    #[error("Code must contain only decimal digits")]
    NotNumeric,

    /// The configured length is outside the supported range
    #[error("Code length must be between {MIN_CODE_LENGTH} and {MAX_CODE_LENGTH} digits")]
    UnsupportedLength,
}

// ============================================================================
// Clear Text Code (Zeroized on drop)
// ============================================================================

/// Clear text numeric code with automatic memory zeroization
///
/// This type ensures that the local secret is securely erased from memory
/// when the value is dropped.
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::code::ClearTextCode;
///
/// let code = ClearTextCode::new("7391".to_string(), 4).unwrap();
/// let again = ClearTextCode::new("7391".to_string(), 4).unwrap();
/// assert!(code.matches(&again));
/// ```
#[derive(Zeroize, ZeroizeOnDrop, PartialEq)]
pub struct ClearTextCode(String);

impl ClearTextCode {
    /// Create a new clear text code with validation
    ///
    /// Validates that the input consists of exactly `expected_len` ASCII
    /// decimal digits. `expected_len` itself must lie within
    /// [`MIN_CODE_LENGTH`]..=[`MAX_CODE_LENGTH`].
    pub fn new(raw: String, expected_len: usize) -> Result<Self, CodePolicyError> {
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&expected_len) {
            return Err(CodePolicyError::UnsupportedLength);
        }

        if raw.chars().any(|c| !c.is_ascii_digit()) {
            return Err(CodePolicyError::NotNumeric);
        }

        let digit_count = raw.chars().count();
        if digit_count != expected_len {
            return Err(CodePolicyError::WrongLength {
                expected: expected_len,
                actual: digit_count,
            });
        }

        Ok(Self(raw))
    }

    /// Reconstruct a code read back from secure storage
    ///
    /// A stored value that does not look like a code (wrong charset, length
    /// outside the supported range) is treated as absent rather than an
    /// error; the gate degrades to "not configured" on corruption.
    pub fn from_stored(raw: String) -> Option<Self> {
        let len = raw.chars().count();
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&len) {
            return None;
        }
        if raw.chars().any(|c| !c.is_ascii_digit()) {
            return None;
        }
        Some(Self(raw))
    }

    /// Compare against another code in constant time
    pub fn matches(&self, other: &ClearTextCode) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }

    /// Access the digits for persistence
    ///
    /// Only the credential repository should call this; the digits must not
    /// be cached beyond a single store write.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClearTextCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextCode").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_code() {
        assert!(ClearTextCode::new("7391".to_string(), 4).is_ok());
        assert!(ClearTextCode::new("000000".to_string(), 6).is_ok());
    }

    #[test]
    fn test_wrong_length() {
        assert_eq!(
            ClearTextCode::new("739".to_string(), 4),
            Err(CodePolicyError::WrongLength {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            ClearTextCode::new("73911".to_string(), 4),
            Err(CodePolicyError::WrongLength {
                expected: 4,
                actual: 5
            })
        );
    }

    #[test]
    fn test_not_numeric() {
        assert_eq!(
            ClearTextCode::new("73a1".to_string(), 4),
            Err(CodePolicyError::NotNumeric)
        );
        // Non-ASCII digits are rejected: the entry pad only produces 0-9
        assert_eq!(
            ClearTextCode::new("１２３４".to_string(), 4),
            Err(CodePolicyError::NotNumeric)
        );
    }

    #[test]
    fn test_unsupported_length() {
        assert_eq!(
            ClearTextCode::new("123".to_string(), 3),
            Err(CodePolicyError::UnsupportedLength)
        );
        assert_eq!(
            ClearTextCode::new("123456789".to_string(), 9),
            Err(CodePolicyError::UnsupportedLength)
        );
    }

    #[test]
    fn test_matches() {
        let a = ClearTextCode::new("7391".to_string(), 4).unwrap();
        let b = ClearTextCode::new("7391".to_string(), 4).unwrap();
        let c = ClearTextCode::new("7392".to_string(), 4).unwrap();
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }

    #[test]
    fn test_matches_different_length() {
        let a = ClearTextCode::new("7391".to_string(), 4).unwrap();
        let b = ClearTextCode::new("73910".to_string(), 5).unwrap();
        assert!(!a.matches(&b));
    }

    #[test]
    fn test_from_stored() {
        assert!(ClearTextCode::from_stored("7391".to_string()).is_some());
        assert!(ClearTextCode::from_stored("12345678".to_string()).is_some());
        assert!(ClearTextCode::from_stored("123".to_string()).is_none());
        assert!(ClearTextCode::from_stored("123456789".to_string()).is_none());
        assert!(ClearTextCode::from_stored("73a1".to_string()).is_none());
        assert!(ClearTextCode::from_stored(String::new()).is_none());
    }

    #[test]
    fn test_debug_redaction() {
        let code = ClearTextCode::new("7391".to_string(), 4).unwrap();
        let debug = format!("{:?}", code);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("7391"));
    }
}
