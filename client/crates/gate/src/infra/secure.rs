//! Secure Store Repository Implementation
//!
//! Credential persistence over the platform's secure key/value store.
//! Every read absorbs storage failures into the absent value and every
//! write failure is logged: the gate degrades to "not configured" rather
//! than crashing or silently unlocking.

use platform::secure_store::{SecureKeyValueStore, StoreResult};

use crate::domain::entity::credential::Credential;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::{opt_in::OptIn, pin_code::PinCode};

/// Storage keys for the persisted credential fields
mod keys {
    pub const CODE: &str = "gate.code";
    pub const BIOMETRICS_ENABLED: &str = "gate.biometrics_enabled";
    pub const CAN_USE_BIOMETRICS: &str = "gate.can_use_biometrics";
    pub const CODE_FAILURES: &str = "gate.code_failures";
    pub const BIOMETRIC_FAILURES: &str = "gate.biometric_failures";

    /// Wipe order matters: the code goes first so that a partial reset can
    /// only ever leave the gate unconfigured, never half-armed
    pub const ALL: [&str; 5] = [
        CODE,
        BIOMETRICS_ENABLED,
        CAN_USE_BIOMETRICS,
        CODE_FAILURES,
        BIOMETRIC_FAILURES,
    ];
}

/// Secure-store-backed credential repository
#[derive(Clone)]
pub struct SecureCredentialRepository<S> {
    store: S,
}

impl<S> SecureCredentialRepository<S>
where
    S: SecureKeyValueStore + Sync,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Absorb a read failure into the absent value
    fn absorb<T>(result: StoreResult<Option<T>>, key: &str) -> Option<T> {
        match result {
            Ok(value) => value,
            Err(error) => {
                tracing::warn!(key, %error, "secure store read failed, treating value as absent");
                None
            }
        }
    }

    /// Log a write failure; there is nothing else safe to do with it
    fn log_write(result: StoreResult<()>, key: &str) {
        if let Err(error) = result {
            tracing::warn!(key, %error, "secure store write failed");
        }
    }

    async fn read_flag(&self, key: &str) -> OptIn {
        OptIn::from_stored(Self::absorb(self.store.get_bool(key).await, key))
    }

    async fn write_flag(&self, key: &str, value: OptIn) {
        Self::log_write(self.store.set_bool(key, value.to_stored()).await, key);
    }

    async fn read_count(&self, key: &str) -> u32 {
        Self::absorb(self.store.get_i64(key).await, key)
            .and_then(|raw| u32::try_from(raw).ok())
            .unwrap_or(0)
    }

    async fn write_count(&self, key: &str, value: u32) {
        Self::log_write(self.store.set_i64(key, Some(i64::from(value))).await, key);
    }

    async fn read_code(&self) -> Option<PinCode> {
        let raw = Self::absorb(self.store.get_string(keys::CODE).await, keys::CODE)?;
        let code = PinCode::from_stored(raw);
        if code.is_none() {
            tracing::warn!("stored code is corrupted, treating gate as not configured");
        }
        code
    }
}

impl<S> CredentialRepository for SecureCredentialRepository<S>
where
    S: SecureKeyValueStore + Sync,
{
    async fn snapshot(&self) -> Credential {
        Credential {
            code_set: self.read_code().await.is_some(),
            biometrics_enabled: self.read_flag(keys::BIOMETRICS_ENABLED).await,
            can_use_biometrics: self.read_flag(keys::CAN_USE_BIOMETRICS).await,
            code_failures: self.read_count(keys::CODE_FAILURES).await,
            biometric_failures: self.read_count(keys::BIOMETRIC_FAILURES).await,
        }
    }

    async fn code(&self) -> Option<PinCode> {
        self.read_code().await
    }

    async fn set_code(&self, code: Option<&PinCode>) {
        Self::log_write(
            self.store
                .set_string(keys::CODE, code.map(|c| c.as_str()))
                .await,
            keys::CODE,
        );
    }

    async fn biometrics_enabled(&self) -> OptIn {
        self.read_flag(keys::BIOMETRICS_ENABLED).await
    }

    async fn set_biometrics_enabled(&self, value: OptIn) {
        self.write_flag(keys::BIOMETRICS_ENABLED, value).await;
    }

    async fn can_use_biometrics(&self) -> OptIn {
        self.read_flag(keys::CAN_USE_BIOMETRICS).await
    }

    async fn set_can_use_biometrics(&self, value: OptIn) {
        self.write_flag(keys::CAN_USE_BIOMETRICS, value).await;
    }

    async fn code_failures(&self) -> u32 {
        self.read_count(keys::CODE_FAILURES).await
    }

    async fn record_code_failure(&self) -> u32 {
        let next = self.read_count(keys::CODE_FAILURES).await.saturating_add(1);
        self.write_count(keys::CODE_FAILURES, next).await;
        next
    }

    async fn reset_code_failures(&self) {
        Self::log_write(
            self.store.remove(keys::CODE_FAILURES).await,
            keys::CODE_FAILURES,
        );
    }

    async fn biometric_failures(&self) -> u32 {
        self.read_count(keys::BIOMETRIC_FAILURES).await
    }

    async fn record_biometric_failure(&self) -> u32 {
        let next = self
            .read_count(keys::BIOMETRIC_FAILURES)
            .await
            .saturating_add(1);
        self.write_count(keys::BIOMETRIC_FAILURES, next).await;
        next
    }

    async fn reset_biometric_failures(&self) {
        Self::log_write(
            self.store.remove(keys::BIOMETRIC_FAILURES).await,
            keys::BIOMETRIC_FAILURES,
        );
    }

    async fn reset_failures(&self) {
        self.reset_code_failures().await;
        self.reset_biometric_failures().await;
    }

    async fn reset(&self) {
        for key in keys::ALL {
            Self::log_write(self.store.remove(key).await, key);
        }
        tracing::info!("local credential store wiped");
    }
}
