//! Gate Intent Value Object
//!
//! The externally supplied reason for presenting the gate. Every intent
//! maps to exactly one child flow; the resolver owns that mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the caller wants the gate to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateIntent {
    /// Choose a new local code from settings
    SetCode,
    /// Choose a local code right after login
    SetCodeAfterLogin,
    /// Choose a local code right after registration
    SetCodeAfterRegister,
    /// The stored code is no longer acceptable; a replacement is required
    CodeNotAllowed,
    /// Re-authenticate a foregrounded session
    Unlock,
    /// Confirm the current code before removing it
    ConfirmCodeToDeactivate,
    /// Offer biometric setup during onboarding (skippable)
    SetupBiometricAfterLogin,
    /// Enable biometric unlock from settings
    SetupBiometricFromSettings,
    /// Confirm biometrics before disabling them
    ConfirmBiometricToDeactivate,
    /// Privacy shield while backgrounded; nothing to complete
    Inactive,
    /// Replace the current code with a new one
    ChangeCode,
}

impl GateIntent {
    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::SetCode => "set_code",
            Self::SetCodeAfterLogin => "set_code_after_login",
            Self::SetCodeAfterRegister => "set_code_after_register",
            Self::CodeNotAllowed => "code_not_allowed",
            Self::Unlock => "unlock",
            Self::ConfirmCodeToDeactivate => "confirm_code_to_deactivate",
            Self::SetupBiometricAfterLogin => "setup_biometric_after_login",
            Self::SetupBiometricFromSettings => "setup_biometric_from_settings",
            Self::ConfirmBiometricToDeactivate => "confirm_biometric_to_deactivate",
            Self::Inactive => "inactive",
            Self::ChangeCode => "change_code",
        }
    }

    /// Check if this intent targets the biometric flow
    #[inline]
    pub const fn uses_biometric_flow(&self) -> bool {
        matches!(
            self,
            Self::SetupBiometricAfterLogin
                | Self::SetupBiometricFromSettings
                | Self::ConfirmBiometricToDeactivate
        )
    }

    /// Check if this intent asks the user to choose a new code
    #[inline]
    pub const fn chooses_new_code(&self) -> bool {
        matches!(
            self,
            Self::SetCode
                | Self::SetCodeAfterLogin
                | Self::SetCodeAfterRegister
                | Self::CodeNotAllowed
                | Self::ChangeCode
        )
    }

    /// Check if this is the unlock intent
    #[inline]
    pub const fn is_unlock(&self) -> bool {
        matches!(self, Self::Unlock)
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "set_code" => Some(Self::SetCode),
            "set_code_after_login" => Some(Self::SetCodeAfterLogin),
            "set_code_after_register" => Some(Self::SetCodeAfterRegister),
            "code_not_allowed" => Some(Self::CodeNotAllowed),
            "unlock" => Some(Self::Unlock),
            "confirm_code_to_deactivate" => Some(Self::ConfirmCodeToDeactivate),
            "setup_biometric_after_login" => Some(Self::SetupBiometricAfterLogin),
            "setup_biometric_from_settings" => Some(Self::SetupBiometricFromSettings),
            "confirm_biometric_to_deactivate" => Some(Self::ConfirmBiometricToDeactivate),
            "inactive" => Some(Self::Inactive),
            "change_code" => Some(Self::ChangeCode),
            _ => None,
        }
    }
}

impl fmt::Display for GateIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [GateIntent; 11] = [
        GateIntent::SetCode,
        GateIntent::SetCodeAfterLogin,
        GateIntent::SetCodeAfterRegister,
        GateIntent::CodeNotAllowed,
        GateIntent::Unlock,
        GateIntent::ConfirmCodeToDeactivate,
        GateIntent::SetupBiometricAfterLogin,
        GateIntent::SetupBiometricFromSettings,
        GateIntent::ConfirmBiometricToDeactivate,
        GateIntent::Inactive,
        GateIntent::ChangeCode,
    ];

    #[test]
    fn test_code_roundtrip() {
        for intent in ALL {
            assert_eq!(GateIntent::from_code(intent.code()), Some(intent));
        }
        assert_eq!(GateIntent::from_code("unknown"), None);
    }

    #[test]
    fn test_uses_biometric_flow() {
        assert!(GateIntent::SetupBiometricAfterLogin.uses_biometric_flow());
        assert!(GateIntent::SetupBiometricFromSettings.uses_biometric_flow());
        assert!(GateIntent::ConfirmBiometricToDeactivate.uses_biometric_flow());
        assert!(!GateIntent::Unlock.uses_biometric_flow());
        assert!(!GateIntent::SetCode.uses_biometric_flow());
    }

    #[test]
    fn test_chooses_new_code() {
        assert!(GateIntent::SetCode.chooses_new_code());
        assert!(GateIntent::SetCodeAfterLogin.chooses_new_code());
        assert!(GateIntent::SetCodeAfterRegister.chooses_new_code());
        assert!(GateIntent::CodeNotAllowed.chooses_new_code());
        assert!(GateIntent::ChangeCode.chooses_new_code());
        assert!(!GateIntent::Unlock.chooses_new_code());
        assert!(!GateIntent::ConfirmCodeToDeactivate.chooses_new_code());
    }

    #[test]
    fn test_is_unlock() {
        assert!(GateIntent::Unlock.is_unlock());
        assert!(!GateIntent::Inactive.is_unlock());
    }

    #[test]
    fn test_display() {
        assert_eq!(GateIntent::Unlock.to_string(), "unlock");
        assert_eq!(
            GateIntent::ConfirmBiometricToDeactivate.to_string(),
            "confirm_biometric_to_deactivate"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let json = serde_json::to_string(&GateIntent::SetCodeAfterLogin).unwrap();
        assert_eq!(json, "\"set_code_after_login\"");
        let back: GateIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GateIntent::SetCodeAfterLogin);
    }
}
