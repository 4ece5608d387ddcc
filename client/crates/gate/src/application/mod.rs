//! Application Layer
//!
//! Use cases and application services.

pub mod biometric_flow;
pub mod config;
pub mod enter_code;
pub mod evaluator;
pub mod resolver;

// Re-exports
pub use biometric_flow::{BiometricFlow, BiometricFlowOutcome, BiometricMode};
pub use config::GateConfig;
pub use enter_code::{
    CodeFeedback, CodePrompt, CodePurpose, CodeScreen, DeadEndChoice, EnterCodeFlow,
    EnterCodeOutcome,
};
pub use evaluator::BiometricEvaluator;
pub use resolver::{ActiveFlow, GateResolver};
