//! Port abstraction for comparing presented passwords with stored ones.
//!
//! The registry never compares passwords itself. Swapping in a hashing
//! verifier only needs a new implementation of [`CredentialVerifier`].

use crate::domain::Password;

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential verifier adapters.
    pub enum CredentialVerificationError {
        /// Stored credential could not be interpreted by the verifier.
        Malformed { message: String } => "stored credential is malformed: {message}",
    }
}

/// Port for checking a presented password against an account's credential.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialVerifier: Send + Sync {
    /// Return `Ok(true)` when `presented` matches `stored`.
    fn verify(&self, stored: &Password, presented: &str)
    -> Result<bool, CredentialVerificationError>;
}

/// Exact, case-sensitive plain-text comparison.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextCredentialVerifier;

impl CredentialVerifier for PlaintextCredentialVerifier {
    fn verify(
        &self,
        stored: &Password,
        presented: &str,
    ) -> Result<bool, CredentialVerificationError> {
        Ok(stored.expose() == presented)
    }
}
