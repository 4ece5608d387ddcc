//! Gate Outcome Value Object
//!
//! The single terminal outcome reported to the caller for each submitted
//! intent, after zero or more internal cascades.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal outcome of one resolved intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GateOutcome {
    /// The intent succeeded
    Completed,

    /// The user backed out without completing the intent
    Cancelled,

    /// The local credential was wiped and the remote session must go too
    CompletedWithReset {
        /// `true` when a failure threshold forced the reset; `false` for a
        /// user-initiated reset (e.g. "forgot code" at a dead end)
        due_to_too_many_failures: bool,
    },
}

impl GateOutcome {
    /// Check if this outcome wiped the local credential
    #[inline]
    pub const fn is_reset(&self) -> bool {
        matches!(self, Self::CompletedWithReset { .. })
    }

    /// Check if a lockout threshold caused the reset
    #[inline]
    pub const fn is_lockout(&self) -> bool {
        matches!(
            self,
            Self::CompletedWithReset {
                due_to_too_many_failures: true
            }
        )
    }
}

impl fmt::Display for GateOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => f.write_str("completed"),
            Self::Cancelled => f.write_str("cancelled"),
            Self::CompletedWithReset {
                due_to_too_many_failures,
            } => write!(
                f,
                "completed_with_reset(too_many_failures={})",
                due_to_too_many_failures
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_reset() {
        assert!(!GateOutcome::Completed.is_reset());
        assert!(!GateOutcome::Cancelled.is_reset());
        assert!(
            GateOutcome::CompletedWithReset {
                due_to_too_many_failures: false
            }
            .is_reset()
        );
    }

    #[test]
    fn test_is_lockout() {
        assert!(
            GateOutcome::CompletedWithReset {
                due_to_too_many_failures: true
            }
            .is_lockout()
        );
        assert!(
            !GateOutcome::CompletedWithReset {
                due_to_too_many_failures: false
            }
            .is_lockout()
        );
        assert!(!GateOutcome::Completed.is_lockout());
    }

    #[test]
    fn test_display() {
        assert_eq!(GateOutcome::Completed.to_string(), "completed");
        assert_eq!(
            GateOutcome::CompletedWithReset {
                due_to_too_many_failures: true
            }
            .to_string(),
            "completed_with_reset(too_many_failures=true)"
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let outcome = GateOutcome::CompletedWithReset {
            due_to_too_many_failures: true,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let back: GateOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }
}
