//! Error types for the example-data crate.
//!
//! This module defines semantic error enums for registry parsing and resident
//! generation, following the project's error handling conventions with
//! `thiserror`.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when parsing or querying a seed registry.
///
/// These errors cover file I/O, JSON parsing, schema validation, and seed
/// lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// Two fixed accounts share the same identifier.
    #[error("duplicate account id '{id}' in registry")]
    DuplicateAccountId {
        /// The repeated identifier.
        id: String,
    },

    /// A fixed account fails registration constraints.
    #[error("invalid account at index {index}: {message}")]
    InvalidAccount {
        /// Index of the account in the array.
        index: usize,
        /// Description of the violated constraint.
        message: String,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors that can occur during resident generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Failed to generate a valid resident name after maximum retries.
    #[error("failed to generate valid resident name after {max_attempts} attempts")]
    NameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The registry lists no apartment blocks to place residents in.
    #[error("registry contains no apartment blocks for selection")]
    NoApartmentBlocks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_error_io_formats_correctly() {
        let err = RegistryError::IoError {
            path: PathBuf::from("/tmp/seeds.json"),
            message: "file not found".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to read registry file at '/tmp/seeds.json': file not found"
        );
    }

    #[test]
    fn registry_error_version_formats_correctly() {
        let err = RegistryError::UnsupportedVersion {
            expected: 1,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "unsupported registry version: expected 1, found 2"
        );
    }

    #[test]
    fn registry_error_invalid_account_formats_correctly() {
        let err = RegistryError::InvalidAccount {
            index: 3,
            message: "tenant accounts need owner details".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "invalid account at index 3: tenant accounts need owner details"
        );
    }

    #[test]
    fn registry_error_seed_not_found_formats_correctly() {
        let err = RegistryError::SeedNotFound {
            name: "green-valley".to_owned(),
        };
        assert_eq!(err.to_string(), "seed 'green-valley' not found in registry");
    }

    #[test]
    fn generation_error_no_blocks_formats_correctly() {
        assert_eq!(
            GenerationError::NoApartmentBlocks.to_string(),
            "registry contains no apartment blocks for selection"
        );
    }
}
