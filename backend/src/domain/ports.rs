//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_verifier;

#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use credential_verifier::{
    CredentialVerificationError, CredentialVerifier, PlaintextCredentialVerifier,
};
