//! Application Configuration
//!
//! Configuration for the gate application layer.

use std::collections::HashSet;
use std::time::Duration;

/// Default code length in digits
pub const DEFAULT_CODE_LENGTH: usize = 4;

/// Default mismatch count that wipes the credential
pub const DEFAULT_MAX_CODE_FAILURES: u32 = 5;

/// Default biometric failure count that wipes the credential
pub const DEFAULT_MAX_BIOMETRIC_FAILURES: u32 = 5;

/// Default mismatch count that surfaces the "forgot code?" advisory
pub const DEFAULT_FORGOT_CODE_HINT_AFTER: u32 = 3;

/// Gate application configuration
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Fixed code length in digits
    pub code_length: usize,
    /// Consecutive mismatches that force a reset
    pub max_code_failures: u32,
    /// Consecutive biometric failures that force a reset
    pub max_biometric_failures: u32,
    /// Mismatch count at which the "forgot code?" advisory appears;
    /// kept strictly below `max_code_failures`
    pub forgot_code_hint_after: u32,
    /// Trivially guessable codes that may not be chosen
    pub denied_codes: HashSet<String>,
    /// Foreground window within which the caller may skip the gate
    /// entirely; evaluated by the caller, not by this crate
    pub grace_period: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            max_code_failures: DEFAULT_MAX_CODE_FAILURES,
            max_biometric_failures: DEFAULT_MAX_BIOMETRIC_FAILURES,
            forgot_code_hint_after: DEFAULT_FORGOT_CODE_HINT_AFTER,
            denied_codes: ["0000", "1234"].map(String::from).into(),
            grace_period: Duration::from_secs(120),
        }
    }
}

impl GateConfig {
    /// Check a candidate against the denylist
    pub fn is_code_denied(&self, digits: &str) -> bool {
        self.denied_codes.contains(digits)
    }

    /// The advisory threshold, clamped below the lockout threshold
    pub fn forgot_hint_threshold(&self) -> u32 {
        self.forgot_code_hint_after
            .min(self.max_code_failures.saturating_sub(1))
    }

    /// Get the grace period in milliseconds
    pub fn grace_period_ms(&self) -> i64 {
        self.grace_period.as_millis() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GateConfig::default();
        assert_eq!(config.code_length, 4);
        assert_eq!(config.max_code_failures, 5);
        assert_eq!(config.max_biometric_failures, 5);
        assert!(config.forgot_code_hint_after < config.max_code_failures);
        assert!(config.is_code_denied("0000"));
        assert!(config.is_code_denied("1234"));
        assert!(!config.is_code_denied("7391"));
    }

    #[test]
    fn test_forgot_hint_threshold_clamped() {
        let config = GateConfig {
            max_code_failures: 3,
            forgot_code_hint_after: 7,
            ..Default::default()
        };
        assert_eq!(config.forgot_hint_threshold(), 2);
    }

    #[test]
    fn test_forgot_hint_threshold_unclamped() {
        let config = GateConfig::default();
        assert_eq!(config.forgot_hint_threshold(), 3);
    }

    #[test]
    fn test_grace_period_ms() {
        let config = GateConfig::default();
        assert_eq!(config.grace_period_ms(), 120_000);
    }
}
