//! Pin Code Value Object
//!
//! Domain value object for the short numeric local secret.
//! Delegates to `platform::code` for zeroization and constant-time
//! comparison.
//!
//! ## Security Features
//! - Automatic memory zeroization
//! - Constant-time comparison
//! - Redacted Debug output
//!
//! The code is owned by the credential store; other components may only
//! hold a `PinCode` for the duration of a single validation call.

use std::collections::HashSet;
use std::fmt;

use kernel::error::app_error::{AppError, AppResult};
use platform::code::{ClearTextCode, CodePolicyError};

/// The user-chosen fixed-length numeric local secret
pub struct PinCode(ClearTextCode);

impl PinCode {
    /// Create from user input with validation
    ///
    /// ## Arguments
    /// * `raw` - The digits as entered
    /// * `expected_len` - The configured code length
    ///
    /// ## Errors
    /// Returns `AppError` with a user-facing message and action.
    pub fn new(raw: String, expected_len: usize) -> AppResult<Self> {
        let code = ClearTextCode::new(raw, expected_len).map_err(|e| match e {
            CodePolicyError::WrongLength { expected, actual } => AppError::validation(format!(
                "Code must be exactly {} digits (got {})",
                expected, actual
            ))
            .with_action("Please enter every digit of your code"),

            CodePolicyError::NotNumeric => {
                AppError::validation("Code must contain only digits")
                    .with_action("Please use the numeric pad only")
            }

            CodePolicyError::UnsupportedLength => {
                AppError::internal("Configured code length is out of range")
            }
        })?;

        Ok(Self(code))
    }

    /// Reconstruct a code read back from secure storage
    ///
    /// A corrupted stored value yields `None`; the gate degrades to
    /// "not configured" rather than failing.
    pub fn from_stored(raw: String) -> Option<Self> {
        ClearTextCode::from_stored(raw).map(Self)
    }

    /// Compare against another code in constant time
    pub fn matches(&self, other: &PinCode) -> bool {
        self.0.matches(&other.0)
    }

    /// Check the code against the configured denylist
    pub fn is_denied(&self, denied_codes: &HashSet<String>) -> bool {
        denied_codes.contains(self.0.as_str())
    }

    /// Access the digits for persistence
    ///
    /// Only the credential repository should call this.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PinCode").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_valid_code() {
        assert!(PinCode::new("7391".to_string(), 4).is_ok());
        assert!(PinCode::new("123456".to_string(), 6).is_ok());
    }

    #[test]
    fn test_wrong_length() {
        let err = PinCode::new("739".to_string(), 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.action().is_some());
    }

    #[test]
    fn test_not_numeric() {
        let err = PinCode::new("73a1".to_string(), 4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_unsupported_length_is_internal() {
        let err = PinCode::new("123".to_string(), 3).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn test_matches() {
        let a = PinCode::new("7391".to_string(), 4).unwrap();
        let b = PinCode::new("7391".to_string(), 4).unwrap();
        let c = PinCode::new("0000".to_string(), 4).unwrap();
        assert!(a.matches(&b));
        assert!(!a.matches(&c));
    }

    #[test]
    fn test_is_denied() {
        let denied: HashSet<String> = ["0000".to_string(), "1234".to_string()].into();
        let trivial = PinCode::new("1234".to_string(), 4).unwrap();
        let decent = PinCode::new("7391".to_string(), 4).unwrap();
        assert!(trivial.is_denied(&denied));
        assert!(!decent.is_denied(&denied));
    }

    #[test]
    fn test_from_stored() {
        assert!(PinCode::from_stored("7391".to_string()).is_some());
        assert!(PinCode::from_stored("not-a-code".to_string()).is_none());
    }

    #[test]
    fn test_debug_redaction() {
        let code = PinCode::new("7391".to_string(), 4).unwrap();
        let debug = format!("{:?}", code);
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("7391"));
    }
}
