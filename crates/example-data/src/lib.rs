//! Deterministic example community data for demonstration purposes.
//!
//! This crate provides tools for loading a community seed registry (fixed
//! accounts, notices, invitations, and maintenance charges) and for
//! generating believable, reproducible demo residents from named seeds. It is
//! designed to be independent of backend domain types to avoid circular
//! dependencies.
//!
//! # Overview
//!
//! The crate supports:
//!
//! - Loading seed registries from JSON files
//! - Validating fixed accounts against registration rules
//! - Deterministic resident generation using named seeds
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_example_residents};
//!
//! let json = r#"{
//!     "version": 1,
//!     "apartmentBlocks": ["A", "B"],
//!     "seeds": [{"name": "test-seed", "seed": 42, "residentCount": 3}]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed_def = registry.find_seed("test-seed").expect("seed exists");
//! let residents = generate_example_residents(&registry, seed_def).expect("generation succeeds");
//!
//! assert_eq!(residents.len(), 3);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_example_residents;
pub use registry::{SeedDefinition, SeedRegistry};
pub use seed::{
    AccountSeed, BroadcastSeed, InvitationSeed, MaintenanceChargeSeed, OccupancySeed, RoleSeed,
    StatusSeed,
};
pub use validation::{
    NAME_MIN, PASSWORD_MIN, PHONE_MIN, is_valid_email, is_valid_password, is_valid_phone,
    is_valid_resident_name,
};
