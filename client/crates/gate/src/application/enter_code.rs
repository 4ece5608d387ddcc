//! Enter-Code Flow
//!
//! Fixed-length numeric entry against the stored code. Owns the mismatch
//! counter and the denylist check; reports one of completed, cancelled, or
//! forced reset back to the resolver. The comparison itself is constant
//! time (see `platform::crypto`).

use std::sync::Arc;

use derive_more::Display;

use crate::application::config::GateConfig;
use crate::domain::policy;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::pin_code::PinCode;
use crate::error::{GateError, GateResult};

// ============================================================================
// Presentation port
// ============================================================================

/// What the code screen is being shown for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum CodePurpose {
    /// Verify the current code to re-enter the session
    #[display("unlock")]
    Unlock,
    /// Choose a new code
    #[display("choose")]
    Choose,
    /// The stored code is no longer acceptable; choose a replacement
    #[display("replace")]
    Replace,
    /// Verify the current code before removing it
    #[display("confirm_deactivate")]
    ConfirmDeactivate,
    /// Privacy shield while backgrounded; no interaction expected
    #[display("inactive")]
    Inactive,
}

/// Why the previous submission was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeFeedback {
    /// The submitted code did not match the stored one
    Mismatch,
    /// The submission was not a complete numeric code
    BadLength,
    /// The candidate is on the denylist of guessable codes
    NotAllowed,
}

/// Everything the UI needs to render one round of code entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeScreen {
    pub purpose: CodePurpose,
    /// Consecutive mismatches so far
    pub failed_attempts: u32,
    /// Surface the "forgot code?" advisory
    pub show_forgot_hint: bool,
    /// Feedback for the previous submission, if any
    pub feedback: Option<CodeFeedback>,
}

/// The binary choice offered at a biometric dead end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadEndChoice {
    /// Run the biometric prompt again
    RetryBiometric,
    /// Give up: wipe the local credential and log out remotely
    ResetSession,
}

/// Trait for the presentation layer driving code entry
///
/// `request_code` returns `None` when the user backs out. The gate never
/// interprets the raw string beyond validation; it is dropped (and the
/// parsed code zeroized) within the submission that consumed it.
#[trait_variant::make(CodePrompt: Send)]
pub trait LocalCodePrompt {
    /// Ask the user for one code entry
    async fn request_code(&self, screen: CodeScreen) -> Option<String>;

    /// Ask the user to resolve a biometric dead end
    async fn choose_dead_end(&self) -> DeadEndChoice;
}

// ============================================================================
// Flow
// ============================================================================

/// Flow-internal outcome consumed by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnterCodeOutcome {
    /// The purpose was fulfilled
    Completed {
        /// A fresh code was chosen and stored
        new_code_set: bool,
    },
    /// The user backed out
    Cancelled,
    /// The credential must be wiped and the remote session invalidated
    Reset { due_to_too_many_failures: bool },
}

/// Enter-code flow
pub struct EnterCodeFlow<R, P>
where
    R: CredentialRepository,
    P: CodePrompt,
{
    repo: Arc<R>,
    prompt: Arc<P>,
    config: Arc<GateConfig>,
}

impl<R, P> EnterCodeFlow<R, P>
where
    R: CredentialRepository + Send + Sync,
    P: CodePrompt + Send + Sync,
{
    pub fn new(repo: Arc<R>, prompt: Arc<P>, config: Arc<GateConfig>) -> Self {
        Self {
            repo,
            prompt,
            config,
        }
    }

    /// Run the flow for one purpose until it yields an outcome
    pub async fn run(&self, purpose: CodePurpose) -> GateResult<EnterCodeOutcome> {
        match purpose {
            // Nothing to complete behind a privacy shield
            CodePurpose::Inactive => Ok(EnterCodeOutcome::Completed {
                new_code_set: false,
            }),
            CodePurpose::Unlock | CodePurpose::ConfirmDeactivate => self.verify(purpose).await,
            CodePurpose::Choose | CodePurpose::Replace => self.choose(purpose).await,
        }
    }

    /// Verify the current code, tracking mismatches
    async fn verify(&self, purpose: CodePurpose) -> GateResult<EnterCodeOutcome> {
        let mut feedback = None;

        loop {
            let failures = self.repo.code_failures().await;
            let screen = CodeScreen {
                purpose,
                failed_attempts: failures,
                show_forgot_hint: policy::nearing_code_lockout(
                    failures,
                    self.config.forgot_hint_threshold(),
                ),
                feedback: feedback.take(),
            };

            let Some(raw) = self.prompt.request_code(screen).await else {
                return Ok(EnterCodeOutcome::Cancelled);
            };

            let candidate = match PinCode::new(raw, self.config.code_length) {
                Ok(candidate) => candidate,
                Err(_) => {
                    feedback = Some(CodeFeedback::BadLength);
                    continue;
                }
            };

            let Some(stored) = self.repo.code().await else {
                tracing::warn!(%purpose, "code entry requested but no code is stored");
                return Err(GateError::NotConfigured);
            };

            if candidate.matches(&stored) {
                self.repo.reset_failures().await;
                if purpose == CodePurpose::ConfirmDeactivate {
                    self.repo.set_code(None).await;
                    tracing::info!("local code deactivated");
                }
                return Ok(EnterCodeOutcome::Completed {
                    new_code_set: false,
                });
            }

            let failures = self.repo.record_code_failure().await;
            tracing::warn!(%purpose, failures, "local code mismatch");

            if policy::exceeded_code_failures(failures, self.config.max_code_failures) {
                return Ok(EnterCodeOutcome::Reset {
                    due_to_too_many_failures: true,
                });
            }
            feedback = Some(CodeFeedback::Mismatch);
        }
    }

    /// Choose a new code, enforcing the denylist
    async fn choose(&self, purpose: CodePurpose) -> GateResult<EnterCodeOutcome> {
        let mut feedback = None;

        loop {
            let screen = CodeScreen {
                purpose,
                failed_attempts: 0,
                show_forgot_hint: false,
                feedback: feedback.take(),
            };

            let Some(raw) = self.prompt.request_code(screen).await else {
                return Ok(EnterCodeOutcome::Cancelled);
            };

            let candidate = match PinCode::new(raw, self.config.code_length) {
                Ok(candidate) => candidate,
                Err(_) => {
                    feedback = Some(CodeFeedback::BadLength);
                    continue;
                }
            };

            // Rejection has no counter or store effect
            if candidate.is_denied(&self.config.denied_codes) {
                feedback = Some(CodeFeedback::NotAllowed);
                continue;
            }

            self.repo.set_code(Some(&candidate)).await;
            self.repo.reset_failures().await;
            tracing::info!(%purpose, "local code configured");

            return Ok(EnterCodeOutcome::Completed { new_code_set: true });
        }
    }
}
