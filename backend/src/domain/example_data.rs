//! Example data seeding orchestration.
//!
//! Converts the fixed accounts, notices, and charges of an example-data
//! registry, plus deterministically generated residents, into domain values
//! and loads them into a [`Community`].

use std::sync::Arc;

use chrono::NaiveDate;
use example_data::{
    AccountSeed, GenerationError, OccupancySeed, RegistryError, RoleSeed, SeedDefinition,
    SeedRegistry, StatusSeed, generate_example_residents,
};
use mockable::Clock;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::account::{Account, AccountId, AccountStatus, Password};
use crate::domain::community::Community;
use crate::domain::notices::InvitationDraft;
use crate::domain::registration::{
    AdminProfile, ContactDetails, OccupancyKind, RegistrationRequest, ResidentProfile,
};

/// Whether the seed was loaded or found already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    Applied,
    AlreadySeeded,
}

/// Result of attempting to apply example data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDataSeedOutcome {
    /// Seed name that was applied.
    pub seed_key: String,
    /// Number of generated residents.
    pub resident_count: usize,
    /// Number of fixed accounts declared by the registry.
    pub fixed_account_count: usize,
    /// Whether the seed was applied or skipped.
    pub result: SeedingResult,
}

/// Errors raised while preparing or applying example data.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    /// Seed registry lookups failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Resident generation failed.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A seeded account failed domain validation.
    #[error("seeded account {id} is invalid: {reason}")]
    InvalidAccount { id: String, reason: String },
    /// An invitation names a host that is not seeded.
    #[error("invitation '{title}' names unknown host {host_id}")]
    UnknownHost { title: String, host_id: String },
    /// A maintenance charge carries an unparseable due date.
    #[error("maintenance charge for {apartment} has invalid due date '{due_on}'")]
    InvalidDueDate { apartment: String, due_on: String },
}

/// Service that loads example data into a community.
#[derive(Clone)]
pub struct ExampleDataSeeder {
    clock: Arc<dyn Clock>,
}

impl ExampleDataSeeder {
    /// Create a seeder stamping accounts with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Apply the named seed within the registry to `community`.
    ///
    /// Nothing is changed when any seeded account id is already present.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataSeedingError`] if registry lookup, generation, or
    /// validation fails. Validation happens before anything is loaded.
    pub fn seed_from_registry(
        &self,
        community: &mut Community,
        registry: &SeedRegistry,
        seed_name: &str,
        resident_count_override: Option<usize>,
    ) -> Result<ExampleDataSeedOutcome, ExampleDataSeedingError> {
        let seed_def = registry.find_seed(seed_name)?;
        let seed_key = seed_def.name().to_owned();
        let resident_count = resident_count_override.unwrap_or(seed_def.resident_count());
        let seed_def = SeedDefinition::new(seed_key.clone(), seed_def.seed(), resident_count);
        let generated = generate_example_residents(registry, &seed_def)?;

        let accounts = registry
            .accounts()
            .iter()
            .chain(generated.iter())
            .map(|seed| self.convert_account(seed))
            .collect::<Result<Vec<_>, _>>()?;
        let charges = registry
            .maintenance_charges()
            .iter()
            .map(|seed| {
                parse_due_date(&seed.due_on).map(|due_on| (seed, due_on)).ok_or_else(|| {
                    ExampleDataSeedingError::InvalidDueDate {
                        apartment: seed.apartment.clone(),
                        due_on: seed.due_on.clone(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let outcome = |result: SeedingResult| ExampleDataSeedOutcome {
            seed_key: seed_key.clone(),
            resident_count,
            fixed_account_count: registry.accounts().len(),
            result,
        };

        if accounts
            .iter()
            .any(|account| community.registry().find(account.id()).is_some())
        {
            debug!(seed_key = %seed_key, "seeded accounts already present");
            return Ok(outcome(SeedingResult::AlreadySeeded));
        }

        for invitation in registry.invitations() {
            let known = accounts
                .iter()
                .any(|account| account.id().as_ref() == invitation.host_account_id);
            if !known {
                return Err(ExampleDataSeedingError::UnknownHost {
                    title: invitation.title.clone(),
                    host_id: invitation.host_account_id.clone(),
                });
            }
        }

        for account in accounts {
            community.seed_account(account);
        }
        // Boards list newest first; reverse so the registry's first entry leads.
        for broadcast in registry.broadcasts().iter().rev() {
            community.notices_mut().post_broadcast(
                broadcast.title.as_str(),
                broadcast.body.as_str(),
                broadcast.posted_by.as_str(),
            );
        }
        for invitation in registry.invitations().iter().rev() {
            let host_id = parse_account_id(&invitation.host_account_id)?;
            community.notices_mut().seed_invitation(
                host_id,
                invitation.host_label.clone(),
                InvitationDraft {
                    title: invitation.title.clone(),
                    schedule: invitation.schedule.clone(),
                    message: invitation.message.clone(),
                },
            );
        }
        for (seed, due_on) in charges {
            community.maintenance_mut().raise_charge(
                seed.apartment.as_str(),
                seed.description.as_str(),
                seed.amount_minor,
                due_on,
            );
        }

        info!(
            seed_key = %seed_key,
            resident_count,
            fixed_account_count = registry.accounts().len(),
            "example data loaded"
        );
        Ok(outcome(SeedingResult::Applied))
    }

    fn convert_account(&self, seed: &AccountSeed) -> Result<Account, ExampleDataSeedingError> {
        let invalid = |reason: String| ExampleDataSeedingError::InvalidAccount {
            id: seed.id.clone(),
            reason,
        };
        let id = parse_account_id(&seed.id)?;
        let now = self.clock.utc();

        let account = match seed.role {
            RoleSeed::Admin => {
                let contact = ContactDetails {
                    name: seed.name.clone(),
                    apartment: seed.apartment.clone(),
                    email: seed.email.clone(),
                    phone: seed.phone.clone(),
                };
                let profile = AdminProfile::try_new(contact, seed.password.clone().map(Password::new))
                    .map_err(|err| invalid(err.to_string()))?;
                Account::admin(id, profile, now)
            }
            RoleSeed::Resident => {
                let password = seed
                    .password
                    .clone()
                    .ok_or_else(|| invalid("resident accounts need a password".to_owned()))?;
                let (occupancy, owner_name, owner_contact) = match &seed.occupancy {
                    Some(OccupancySeed::Owner) => (OccupancyKind::Owner, String::new(), String::new()),
                    Some(OccupancySeed::Tenant {
                        owner_name,
                        owner_contact,
                    }) => (OccupancyKind::Tenant, owner_name.clone(), owner_contact.clone()),
                    None => return Err(invalid("resident accounts need an occupancy".to_owned())),
                };
                let profile = ResidentProfile::try_from(RegistrationRequest {
                    name: seed.name.clone(),
                    apartment: seed.apartment.clone(),
                    email: seed.email.clone(),
                    phone: seed.phone.clone(),
                    password,
                    occupancy,
                    owner_name,
                    owner_contact,
                })
                .map_err(|err| invalid(err.to_string()))?;
                Account::resident(id, profile, now)
            }
        };

        Ok(account.with_status(map_status(seed.status)))
    }
}

fn parse_account_id(raw: &str) -> Result<AccountId, ExampleDataSeedingError> {
    AccountId::new(raw).map_err(|err| ExampleDataSeedingError::InvalidAccount {
        id: raw.to_owned(),
        reason: err.to_string(),
    })
}

fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn map_status(status: StatusSeed) -> AccountStatus {
    match status {
        StatusSeed::Pending => AccountStatus::Pending,
        StatusSeed::Approved => AccountStatus::Approved,
        StatusSeed::Rejected => AccountStatus::Rejected,
    }
}
