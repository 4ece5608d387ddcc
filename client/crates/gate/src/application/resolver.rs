//! Mode Resolver (Gate Coordinator)
//!
//! The finite-state machine at the center of the gate. Each submitted
//! intent selects exactly one child flow; when a child completes the
//! resolver either re-resolves into a fallback flow (the cascade) or
//! reports the terminal outcome. Every transition is enumerated in
//! [`GateResolver::select_flow`] and the match arms of the drive loop, so
//! each cascade path is statically visible.
//!
//! Cascade rules:
//! - A freshly chosen code with biometrics available but not configured
//!   re-resolves into biometric setup without a new external intent.
//! - A dismissed biometric unlock falls back silently to code entry when a
//!   code exists; otherwise the cancellation is forwarded.
//! - A biometric dead end with no code offers a binary choice: retry, or
//!   wipe and log out remotely.
//! - Any forced reset wipes the store and invalidates the remote session
//!   exactly once.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use platform::biometrics::{BiometricCapability, BiometryKind};
use tokio::sync::watch;

use crate::application::biometric_flow::{BiometricFlow, BiometricFlowOutcome, BiometricMode};
use crate::application::config::GateConfig;
use crate::application::enter_code::{
    CodePrompt, CodePurpose, DeadEndChoice, EnterCodeFlow, EnterCodeOutcome,
};
use crate::application::evaluator::BiometricEvaluator;
use crate::domain::entity::credential::Credential;
use crate::domain::policy;
use crate::domain::repository::{CredentialRepository, SessionInvalidator};
use crate::domain::value_object::{intent::GateIntent, outcome::GateOutcome};
use crate::error::{GateError, GateResult};

// ============================================================================
// Observable state
// ============================================================================

/// The child flow currently owning the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveFlow {
    /// No intent is being resolved
    #[default]
    Idle,
    /// Code entry is presented
    EnterCode(CodePurpose),
    /// The biometric prompt is presented
    Biometric(BiometricMode),
    /// The dead-end binary choice is presented
    DeadEnd,
}

/// Internal selection result; one child flow per intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    EnterCode(CodePurpose),
    Biometric(BiometricMode),
}

// ============================================================================
// Busy guard
// ============================================================================

/// RAII release of the resolver's busy flag
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Gate coordinator
///
/// Owns the child flows and the busy/idle state. One gate instance serves
/// one logical session; all services are injected, so parallel instances
/// (and parallel tests) never share state.
pub struct GateResolver<R, B, P, I>
where
    R: CredentialRepository,
    B: BiometricCapability,
    P: CodePrompt,
    I: SessionInvalidator,
{
    repo: Arc<R>,
    evaluator: BiometricEvaluator<B>,
    enter_code: EnterCodeFlow<R, P>,
    biometric: BiometricFlow<R, B>,
    prompt: Arc<P>,
    invalidator: Arc<I>,
    busy: AtomicBool,
    flow_tx: watch::Sender<ActiveFlow>,
}

impl<R, B, P, I> GateResolver<R, B, P, I>
where
    R: CredentialRepository + Send + Sync,
    B: BiometricCapability + Send + Sync,
    P: CodePrompt + Send + Sync,
    I: SessionInvalidator + Send + Sync,
{
    pub fn new(
        repo: Arc<R>,
        capability: Arc<B>,
        prompt: Arc<P>,
        invalidator: Arc<I>,
        config: Arc<GateConfig>,
    ) -> Self {
        let evaluator = BiometricEvaluator::new(capability);
        let enter_code = EnterCodeFlow::new(
            Arc::clone(&repo),
            Arc::clone(&prompt),
            Arc::clone(&config),
        );
        let biometric = BiometricFlow::new(Arc::clone(&repo), evaluator.clone(), config);
        let (flow_tx, _) = watch::channel(ActiveFlow::Idle);

        Self {
            repo,
            evaluator,
            enter_code,
            biometric,
            prompt,
            invalidator,
            busy: AtomicBool::new(false),
            flow_tx,
        }
    }

    /// Observe the currently active child flow
    ///
    /// The presentation layer renders whatever this reports; the gate
    /// itself never draws anything.
    pub fn watch_flow(&self) -> watch::Receiver<ActiveFlow> {
        self.flow_tx.subscribe()
    }

    /// Whether a local code is configured
    ///
    /// Exposed so the caller can apply its grace-period policy before
    /// submitting an `Unlock` intent.
    pub async fn is_configured(&self) -> bool {
        self.repo.snapshot().await.is_configured()
    }

    /// The kind of biometry the device offers, for presentation copy
    pub fn biometry_kind(&self) -> BiometryKind {
        self.evaluator.biometry_kind()
    }

    /// Resolve one intent to its terminal outcome
    ///
    /// Runs child flows (and their cascades) to completion. Submitting a
    /// second intent while one is active fails with [`GateError::Busy`].
    pub async fn resolve(&self, intent: GateIntent) -> GateResult<GateOutcome> {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            let err = GateError::Busy;
            err.log();
            return Err(err);
        };

        let result = self.drive(intent).await;
        self.flow_tx.send_replace(ActiveFlow::Idle);

        match &result {
            Ok(outcome) => {
                tracing::info!(intent = %intent, outcome = %outcome, "gate intent resolved");
            }
            Err(err) => err.log(),
        }
        result
    }

    /// The drive loop: select, run, re-resolve until terminal
    async fn drive(&self, initial: GateIntent) -> GateResult<GateOutcome> {
        let mut intent = initial;
        // Set after a biometric dead end with a configured code, to route
        // the next unlock selection to code entry without touching the
        // stored flags
        let mut force_code = false;

        loop {
            let available = self.evaluator.is_available();
            let cred = self.repo.snapshot().await.with_platform_availability(available);

            match self.select_flow(intent, &cred, force_code, available)? {
                Flow::EnterCode(purpose) => {
                    self.flow_tx.send_replace(ActiveFlow::EnterCode(purpose));

                    match self.enter_code.run(purpose).await? {
                        EnterCodeOutcome::Completed { new_code_set } => {
                            if new_code_set && self.offer_biometric_setup().await {
                                tracing::info!("new code set, offering biometric setup");
                                intent = GateIntent::SetupBiometricAfterLogin;
                                continue;
                            }
                            return Ok(GateOutcome::Completed);
                        }
                        EnterCodeOutcome::Cancelled => return Ok(GateOutcome::Cancelled),
                        EnterCodeOutcome::Reset {
                            due_to_too_many_failures,
                        } => return Ok(self.force_reset(due_to_too_many_failures).await),
                    }
                }
                Flow::Biometric(mode) => {
                    self.flow_tx.send_replace(ActiveFlow::Biometric(mode));

                    match self.biometric.run(mode).await? {
                        BiometricFlowOutcome::Completed => return Ok(GateOutcome::Completed),
                        BiometricFlowOutcome::Reset {
                            due_to_too_many_failures,
                        } => return Ok(self.force_reset(due_to_too_many_failures).await),
                        BiometricFlowOutcome::Cancelled => {
                            if mode.is_unlock() {
                                if cred.is_configured() {
                                    // The flow soft-disabled biometrics, so
                                    // re-selection routes to code entry
                                    continue;
                                }
                                return Ok(GateOutcome::Cancelled);
                            }
                            // Skipping optional onboarding setup is not an
                            // error
                            if mode == BiometricMode::SetupAfterLogin {
                                return Ok(GateOutcome::Completed);
                            }
                            return Ok(GateOutcome::Cancelled);
                        }
                        BiometricFlowOutcome::DeadEnd => {
                            if cred.is_configured() {
                                force_code = true;
                                continue;
                            }
                            self.flow_tx.send_replace(ActiveFlow::DeadEnd);
                            match self.prompt.choose_dead_end().await {
                                DeadEndChoice::RetryBiometric => continue,
                                DeadEndChoice::ResetSession => {
                                    return Ok(self.force_reset(false).await);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    /// The transition function: one child flow per (intent, state) pair
    fn select_flow(
        &self,
        intent: GateIntent,
        cred: &Credential,
        force_code: bool,
        available: bool,
    ) -> GateResult<Flow> {
        let flow = match intent {
            GateIntent::Unlock => {
                if !force_code && policy::is_biometric_ready(cred, available) {
                    Flow::Biometric(BiometricMode::Unlock)
                } else if policy::is_configured(cred) {
                    Flow::EnterCode(CodePurpose::Unlock)
                } else {
                    return Err(GateError::NotConfigured);
                }
            }
            GateIntent::SetCode
            | GateIntent::SetCodeAfterLogin
            | GateIntent::SetCodeAfterRegister
            | GateIntent::ChangeCode => Flow::EnterCode(CodePurpose::Choose),
            GateIntent::CodeNotAllowed => Flow::EnterCode(CodePurpose::Replace),
            GateIntent::ConfirmCodeToDeactivate => Flow::EnterCode(CodePurpose::ConfirmDeactivate),
            GateIntent::Inactive => Flow::EnterCode(CodePurpose::Inactive),
            GateIntent::SetupBiometricAfterLogin => {
                Flow::Biometric(BiometricMode::SetupAfterLogin)
            }
            GateIntent::SetupBiometricFromSettings => {
                Flow::Biometric(BiometricMode::SetupFromSettings)
            }
            GateIntent::ConfirmBiometricToDeactivate => {
                Flow::Biometric(BiometricMode::ConfirmDeactivate)
            }
        };
        Ok(flow)
    }

    /// Check if a freshly set code should cascade into biometric setup
    async fn offer_biometric_setup(&self) -> bool {
        if !self.evaluator.is_available() {
            return false;
        }
        let cred = self.repo.snapshot().await;
        !cred.is_biometric_configured()
    }

    /// Wipe the credential and invalidate the remote session, exactly once
    /// per forced reset
    async fn force_reset(&self, due_to_too_many_failures: bool) -> GateOutcome {
        self.repo.reset().await;
        self.invalidator.invalidate_remote_session().await;
        tracing::warn!(
            due_to_too_many_failures,
            "local credential wiped, remote session invalidated"
        );
        GateOutcome::CompletedWithReset {
            due_to_too_many_failures,
        }
    }
}
