//! Biometric Evaluator
//!
//! Wraps the platform biometric capability in a single-flight guard: at
//! most one evaluation is in flight per evaluator, shared across clones.
//! A second concurrent call fails fast with
//! [`BiometricError::AlreadyInProgress`] instead of silently never
//! completing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use platform::biometrics::{BiometricCapability, BiometricError, BiometryKind};

/// Single-flight wrapper around a [`BiometricCapability`]
pub struct BiometricEvaluator<B> {
    capability: Arc<B>,
    in_flight: Arc<AtomicBool>,
}

impl<B> Clone for BiometricEvaluator<B> {
    fn clone(&self) -> Self {
        Self {
            capability: Arc::clone(&self.capability),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

/// RAII release of the in-flight flag
///
/// Dropping the guard releases the flag, so a cancelled evaluation future
/// cannot leave the evaluator wedged.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<B> BiometricEvaluator<B>
where
    B: BiometricCapability + Send + Sync,
{
    pub fn new(capability: Arc<B>) -> Self {
        Self {
            capability,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether biometric evaluation can be offered at all
    pub fn is_available(&self) -> bool {
        self.capability.is_available()
    }

    /// The kind of biometry the device offers
    pub fn biometry_kind(&self) -> BiometryKind {
        self.capability.biometry_kind()
    }

    /// Run one biometric evaluation
    ///
    /// Fails with [`BiometricError::AlreadyInProgress`] while another
    /// evaluation holds the flag.
    pub async fn evaluate(&self, reason: &str) -> Result<(), BiometricError> {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            return Err(BiometricError::AlreadyInProgress);
        };
        self.capability.evaluate(reason).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tokio::time::timeout;

    /// Capability that signals when entered and waits to be released
    struct HeldPrompt {
        entered: Notify,
        release: Notify,
    }

    impl HeldPrompt {
        fn new() -> Self {
            Self {
                entered: Notify::new(),
                release: Notify::new(),
            }
        }
    }

    impl BiometricCapability for HeldPrompt {
        fn is_available(&self) -> bool {
            true
        }

        fn biometry_kind(&self) -> BiometryKind {
            BiometryKind::Fingerprint
        }

        async fn evaluate(&self, _reason: &str) -> Result<(), BiometricError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(())
        }
    }

    /// Capability that never completes
    struct StuckPrompt;

    impl BiometricCapability for StuckPrompt {
        fn is_available(&self) -> bool {
            true
        }

        fn biometry_kind(&self) -> BiometryKind {
            BiometryKind::Face
        }

        async fn evaluate(&self, _reason: &str) -> Result<(), BiometricError> {
            std::future::pending().await
        }
    }

    /// Capability that fails immediately
    struct RefusingPrompt;

    impl BiometricCapability for RefusingPrompt {
        fn is_available(&self) -> bool {
            true
        }

        fn biometry_kind(&self) -> BiometryKind {
            BiometryKind::Face
        }

        async fn evaluate(&self, _reason: &str) -> Result<(), BiometricError> {
            Err(BiometricError::PlatformLockout)
        }
    }

    #[tokio::test]
    async fn test_failure_passes_through() {
        let evaluator = BiometricEvaluator::new(Arc::new(RefusingPrompt));
        assert_eq!(
            evaluator.evaluate("unlock").await,
            Err(BiometricError::PlatformLockout)
        );
    }

    #[tokio::test]
    async fn test_concurrent_evaluation_rejected() {
        let capability = Arc::new(HeldPrompt::new());
        let evaluator = BiometricEvaluator::new(Arc::clone(&capability));
        let contender = evaluator.clone();

        let first = tokio::spawn(async move { contender.evaluate("unlock").await });
        capability.entered.notified().await;

        // Second call while the prompt is on screen
        assert_eq!(
            evaluator.evaluate("unlock").await,
            Err(BiometricError::AlreadyInProgress)
        );

        capability.release.notify_one();
        assert_eq!(first.await.unwrap(), Ok(()));

        // Flag released after completion
        capability.release.notify_one();
        assert_eq!(evaluator.evaluate("unlock").await, Ok(()));
    }

    #[tokio::test]
    async fn test_flag_released_when_future_dropped() {
        let evaluator = BiometricEvaluator::new(Arc::new(StuckPrompt));

        // Times out and drops the in-flight evaluation
        let result = timeout(Duration::from_millis(10), evaluator.evaluate("unlock")).await;
        assert!(result.is_err());

        // A fresh call re-acquires the flag (it blocks again instead of
        // failing fast with AlreadyInProgress)
        let result = timeout(Duration::from_millis(10), evaluator.evaluate("unlock")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_capability_passthrough() {
        let evaluator = BiometricEvaluator::new(Arc::new(StuckPrompt));
        assert!(evaluator.is_available());
        assert_eq!(evaluator.biometry_kind(), BiometryKind::Face);
    }
}
