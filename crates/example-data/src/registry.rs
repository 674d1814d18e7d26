//! Seed registry types and JSON parsing.
//!
//! This module defines the seed registry structure that holds fixed accounts,
//! dashboard content, apartment blocks, and named seed definitions. The
//! registry is loaded from JSON and provides deterministic seed lookups.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::seed::{
    AccountSeed, BroadcastSeed, InvitationSeed, MaintenanceChargeSeed, OccupancySeed, RoleSeed,
};
use crate::validation::{
    is_valid_email, is_valid_password, is_valid_phone, is_valid_resident_name,
};

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// A seed registry containing fixed community content and named seeds.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let json = r#"{
///     "version": 1,
///     "accounts": [],
///     "apartmentBlocks": ["A", "B"],
///     "seeds": [{"name": "test", "seed": 42, "residentCount": 5}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid registry");
/// assert_eq!(registry.seeds().len(), 1);
/// assert_eq!(registry.apartment_blocks(), ["A", "B"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    accounts: Vec<AccountSeed>,
    broadcasts: Vec<BroadcastSeed>,
    invitations: Vec<InvitationSeed>,
    maintenance_charges: Vec<MaintenanceChargeSeed>,
    apartment_blocks: Vec<String>,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if:
    /// - The JSON is malformed
    /// - Required fields are missing
    /// - The version is unsupported
    /// - A fixed account is duplicated or fails registration constraints
    /// - The seeds array is empty
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        let mut seen = HashSet::new();
        for (index, account) in raw.accounts.iter().enumerate() {
            if !seen.insert(account.id.as_str()) {
                return Err(RegistryError::DuplicateAccountId {
                    id: account.id.clone(),
                });
            }
            validate_account(account)
                .map_err(|message| RegistryError::InvalidAccount { index, message })?;
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let seeds = raw
            .seeds
            .into_iter()
            .map(|s| SeedDefinition {
                name: s.name,
                seed: s.seed,
                resident_count: s.resident_count,
            })
            .collect();

        Ok(Self {
            version: raw.version,
            accounts: raw.accounts,
            broadcasts: raw.broadcasts,
            invitations: raw.invitations,
            maintenance_charges: raw.maintenance_charges,
            apartment_blocks: raw.apartment_blocks,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns the fixed accounts in declaration order.
    #[must_use]
    pub fn accounts(&self) -> &[AccountSeed] {
        &self.accounts
    }

    /// Returns the broadcast notices in declaration order.
    #[must_use]
    pub fn broadcasts(&self) -> &[BroadcastSeed] {
        &self.broadcasts
    }

    /// Returns the celebration invitations in declaration order.
    #[must_use]
    pub fn invitations(&self) -> &[InvitationSeed] {
        &self.invitations
    }

    /// Returns the maintenance charges in declaration order.
    #[must_use]
    pub fn maintenance_charges(&self) -> &[MaintenanceChargeSeed] {
        &self.maintenance_charges
    }

    /// Returns the apartment blocks generated residents are placed in.
    #[must_use]
    pub fn apartment_blocks(&self) -> &[String] {
        &self.apartment_blocks
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

fn validate_account(account: &AccountSeed) -> Result<(), String> {
    if account.id.trim().is_empty() {
        return Err("account id must not be empty".to_owned());
    }
    if !is_valid_resident_name(&account.name) {
        return Err(format!("name '{}' is too short", account.name));
    }
    if !is_valid_email(&account.email) {
        return Err(format!("email '{}' is not a valid address", account.email));
    }
    if !is_valid_phone(&account.phone) {
        return Err(format!("phone '{}' is too short", account.phone));
    }
    if account
        .password
        .as_deref()
        .is_some_and(|password| !is_valid_password(password))
    {
        return Err("password is too short".to_owned());
    }

    match (account.role, &account.occupancy) {
        (RoleSeed::Admin, None) => Ok(()),
        (RoleSeed::Admin, Some(_)) => Err("admin accounts carry no occupancy".to_owned()),
        (RoleSeed::Resident, None) => Err("resident accounts need an occupancy".to_owned()),
        (RoleSeed::Resident, Some(OccupancySeed::Owner)) => Ok(()),
        (
            RoleSeed::Resident,
            Some(OccupancySeed::Tenant {
                owner_name,
                owner_contact,
            }),
        ) => {
            if owner_name.trim().is_empty() || owner_contact.trim().is_empty() {
                Err("tenant accounts need owner details".to_owned())
            } else {
                Ok(())
            }
        }
    }
}

/// A named seed definition for deterministic resident generation.
///
/// Each seed has a unique name, an RNG seed value, and a resident count that
/// determines how many demo residents to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    resident_count: usize,
}

impl SeedDefinition {
    /// Creates a new seed definition.
    #[must_use]
    pub const fn new(name: String, seed: u64, resident_count: usize) -> Self {
        Self {
            name,
            seed,
            resident_count,
        }
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of residents to generate.
    #[must_use]
    pub const fn resident_count(&self) -> usize {
        self.resident_count
    }
}

/// Raw JSON representation for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    #[serde(default)]
    accounts: Vec<AccountSeed>,
    #[serde(default)]
    broadcasts: Vec<BroadcastSeed>,
    #[serde(default)]
    invitations: Vec<InvitationSeed>,
    #[serde(default)]
    maintenance_charges: Vec<MaintenanceChargeSeed>,
    #[serde(default)]
    apartment_blocks: Vec<String>,
    seeds: Vec<RawSeedDefinition>,
}

/// Raw JSON representation of a seed definition.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    resident_count: usize,
}
