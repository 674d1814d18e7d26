//! Deterministic resident generation from seed definitions.
//!
//! This module provides the core generation function that produces
//! reproducible demo residents from a seed registry. The same seed value
//! always produces identical output.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

use crate::error::GenerationError;
use crate::registry::{SeedDefinition, SeedRegistry};
use crate::seed::{AccountSeed, OccupancySeed, RoleSeed, StatusSeed};
use crate::validation::{email_local_part, is_valid_email, is_valid_resident_name};

/// Maximum number of attempts to generate a valid resident name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Highest floor number used for generated apartments.
const MAX_FLOOR: u32 = 9;

/// Highest unit number on a floor.
const MAX_UNIT: u32 = 4;

/// Probability of a generated resident owning their apartment (70%).
const OWNER_PROBABILITY_NUMERATOR: u32 = 7;

/// Probability of a generated resident still awaiting approval (30%).
const PENDING_PROBABILITY_NUMERATOR: u32 = 3;

/// Probability denominator shared by the ratios above.
const PROBABILITY_DENOMINATOR: u32 = 10;

/// Generates demo residents from a seed definition.
///
/// Uses the seed's `seed` value to initialise a deterministic RNG, ensuring
/// identical output for the same seed definition. The generated residents
/// have:
///
/// - Unique UUID identifiers (deterministically generated)
/// - Names, emails, phones, and passwords that pass registration rules
/// - An apartment in one of the registry's blocks, e.g. `B-304`
/// - Owner occupancy (~70%) or tenant occupancy with owner details
/// - Approved status (~70%) or pending status awaiting review
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - Name generation fails after maximum retries
/// - The registry lists no apartment blocks
///
/// # Example
///
/// ```
/// use example_data::{SeedRegistry, generate_example_residents};
///
/// let json = r#"{
///     "version": 1,
///     "apartmentBlocks": ["A"],
///     "seeds": [{"name": "test", "seed": 42, "residentCount": 3}]
/// }"#;
///
/// let registry = SeedRegistry::from_json(json).expect("valid");
/// let seed_def = registry.find_seed("test").expect("found");
/// let residents = generate_example_residents(&registry, seed_def).expect("generated");
///
/// assert_eq!(residents.len(), 3);
/// // Same seed produces identical residents
/// let again = generate_example_residents(&registry, seed_def).expect("generated");
/// assert_eq!(residents, again);
/// ```
pub fn generate_example_residents(
    registry: &SeedRegistry,
    seed_def: &SeedDefinition,
) -> Result<Vec<AccountSeed>, GenerationError> {
    let blocks = registry.apartment_blocks();
    if blocks.is_empty() {
        return Err(GenerationError::NoApartmentBlocks);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());
    let mut residents = Vec::with_capacity(seed_def.resident_count());

    for ordinal in 0..seed_def.resident_count() {
        residents.push(generate_single_resident(&mut rng, blocks, ordinal)?);
    }

    Ok(residents)
}

/// Generates a single resident with the provided RNG.
fn generate_single_resident(
    rng: &mut ChaCha8Rng,
    blocks: &[String],
    ordinal: usize,
) -> Result<AccountSeed, GenerationError> {
    let id = Uuid::from_u128(rng.random());
    let (first, last) = generate_name(rng)?;
    let apartment = generate_apartment(rng, blocks);

    // The ordinal keeps emails unique when the RNG repeats a name.
    let email = format!(
        "{}.{}{ordinal}@example.com",
        email_local_part(&first),
        email_local_part(&last)
    );
    let phone = generate_phone(rng);
    let password = format!("resident{:04}", rng.random_range(0..10_000_u32));

    let occupancy = if rng.random_ratio(OWNER_PROBABILITY_NUMERATOR, PROBABILITY_DENOMINATOR) {
        OccupancySeed::Owner
    } else {
        let (owner_first, owner_last) = generate_name(rng)?;
        OccupancySeed::Tenant {
            owner_name: format!("{owner_first} {owner_last}"),
            owner_contact: generate_phone(rng),
        }
    };

    let status = if rng.random_ratio(PENDING_PROBABILITY_NUMERATOR, PROBABILITY_DENOMINATOR) {
        StatusSeed::Pending
    } else {
        StatusSeed::Approved
    };

    debug_assert!(is_valid_email(&email), "generated email {email} must be valid");

    Ok(AccountSeed {
        id: id.to_string(),
        role: RoleSeed::Resident,
        status,
        name: format!("{first} {last}"),
        apartment,
        email,
        phone,
        password: Some(password),
        occupancy: Some(occupancy),
    })
}

/// Generates a first and last name using the provided RNG.
///
/// Retries up to `MAX_NAME_ATTEMPTS` times if the generated name fails
/// validation or has no letters usable in an email address.
fn generate_name(rng: &mut ChaCha8Rng) -> Result<(String, String), GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);

        let usable = is_valid_resident_name(&format!("{first} {last}"))
            && !email_local_part(&first).is_empty()
            && !email_local_part(&last).is_empty();
        if usable {
            return Ok((first, last));
        }
    }

    Err(GenerationError::NameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Picks an apartment such as `C-204` from the available blocks.
fn generate_apartment(rng: &mut ChaCha8Rng, blocks: &[String]) -> String {
    let block = blocks.choose(rng).map_or("A", String::as_str);
    let floor = rng.random_range(1..=MAX_FLOOR);
    let unit = rng.random_range(1..=MAX_UNIT);
    format!("{block}-{floor}{unit:02}")
}

/// Produces a ten-digit mobile number starting with 7, 8, or 9.
fn generate_phone(rng: &mut ChaCha8Rng) -> String {
    let lead = rng.random_range(7..=9_u32);
    let rest = rng.random_range(0..1_000_000_000_u64);
    format!("{lead}{rest:09}")
}
