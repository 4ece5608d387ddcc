//! Opt-In Value Object
//!
//! Three-variant flag replacing the usual `Option<bool>` tri-state.
//! `Unset` (never configured) and `Disabled` (explicitly turned off) are
//! different states and must stay distinguishable: a biometric factor that
//! was never offered is not the same as one the user dismissed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tri-state opt-in flag
///
/// Used for both the biometric opt-in and the session-scoped
/// "can use biometrics to unlock" soft-disable flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptIn {
    /// Never configured
    #[default]
    Unset,

    /// Explicitly enabled
    Enabled,

    /// Explicitly disabled
    Disabled,
}

impl OptIn {
    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
        }
    }

    /// Check if explicitly enabled
    #[inline]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    /// Check if explicitly disabled
    #[inline]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// Check if never configured
    #[inline]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "unset" => Some(Self::Unset),
            "enabled" => Some(Self::Enabled),
            "disabled" => Some(Self::Disabled),
            _ => None,
        }
    }

    /// Convert to the secure store representation
    ///
    /// `Unset` maps to an absent value, preserving the store's
    /// absent-vs-false distinction.
    #[inline]
    pub const fn to_stored(self) -> Option<bool> {
        match self {
            Self::Unset => None,
            Self::Enabled => Some(true),
            Self::Disabled => Some(false),
        }
    }

    /// Create from the secure store representation
    #[inline]
    pub const fn from_stored(stored: Option<bool>) -> Self {
        match stored {
            None => Self::Unset,
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
        }
    }
}

impl fmt::Display for OptIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        assert_eq!(OptIn::default(), OptIn::Unset);
    }

    #[test]
    fn test_code_roundtrip() {
        for flag in [OptIn::Unset, OptIn::Enabled, OptIn::Disabled] {
            assert_eq!(OptIn::from_code(flag.code()), Some(flag));
        }
        assert_eq!(OptIn::from_code("maybe"), None);
    }

    #[test]
    fn test_stored_roundtrip() {
        for flag in [OptIn::Unset, OptIn::Enabled, OptIn::Disabled] {
            assert_eq!(OptIn::from_stored(flag.to_stored()), flag);
        }
    }

    #[test]
    fn test_stored_representation() {
        assert_eq!(OptIn::Unset.to_stored(), None);
        assert_eq!(OptIn::Enabled.to_stored(), Some(true));
        assert_eq!(OptIn::Disabled.to_stored(), Some(false));
    }

    #[test]
    fn test_predicates() {
        assert!(OptIn::Enabled.is_enabled());
        assert!(!OptIn::Enabled.is_disabled());
        assert!(OptIn::Disabled.is_disabled());
        assert!(OptIn::Unset.is_unset());
        assert!(!OptIn::Unset.is_enabled());
    }

    #[test]
    fn test_display() {
        assert_eq!(OptIn::Unset.to_string(), "unset");
        assert_eq!(OptIn::Enabled.to_string(), "enabled");
        assert_eq!(OptIn::Disabled.to_string(), "disabled");
    }
}
