//! Gate (Local Re-Authentication) Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, policy, repository traits
//! - `application/` - Flows, resolver, configuration
//! - `infra/` - Secure-store-backed persistence
//!
//! ## Features
//! - Fixed-length numeric code with denylist and lockout policy
//! - Optional biometric unlock layered on top of the code
//! - Automatic biometric-to-code fallback cascade
//! - Forced remote logout after exceeding failure thresholds
//!
//! ## Security Model
//! - The code is compared in constant time and zeroized in memory
//! - Storage failures degrade to "not configured", never to an unlock
//! - Failure counters are persisted; both reset together on any
//!   successful unlock or freshly established credential
//! - Exactly one remote session invalidation per forced reset

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::GateConfig;
pub use application::resolver::{ActiveFlow, GateResolver};
pub use error::{GateError, GateResult};
pub use infra::secure::SecureCredentialRepository;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
}

pub mod store {
    pub use crate::infra::secure::SecureCredentialRepository as CredentialStore;
}

pub mod ports {
    pub use crate::application::enter_code::{CodePrompt, LocalCodePrompt};
    pub use crate::domain::repository::{
        CredentialRepository, LocalCredentialRepository, LocalSessionInvalidator,
        SessionInvalidator,
    };
    pub use platform::biometrics::{BiometricCapability, LocalBiometricCapability};
    pub use platform::secure_store::{LocalSecureKeyValueStore, SecureKeyValueStore};
}
