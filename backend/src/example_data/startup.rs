//! Startup seeding orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use cap_std::{ambient_authority, fs::Dir};
use example_data::{RegistryError, SeedRegistry};
use mockable::Clock;
use thiserror::Error;
use tracing::info;

use crate::domain::{
    Community, ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError, SeedingResult,
};
use crate::example_data::config::ExampleDataSettings;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry file could not be read.
    #[error("failed to read registry at {path}: {source}")]
    RegistryRead {
        /// Path to the registry file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Registry parsing failed.
    #[error("registry parse error: {0}")]
    Registry(#[from] RegistryError),
    /// Seed generation or conversion failed.
    #[error("example data seeding error: {0}")]
    Seeding(#[from] ExampleDataSeedingError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Load example data into `community` when enabled.
///
/// # Examples
///
/// ```rust
/// use std::path::PathBuf;
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use secudeliv::Community;
/// use secudeliv::example_data::{ExampleDataSettings, seed_example_data_on_startup};
///
/// let settings = ExampleDataSettings {
///     enabled: false,
///     seed_name: Some("green-valley".to_string()),
///     count: None,
///     registry_path: Some(PathBuf::from("fixtures/example-data/seeds.json")),
/// };
/// let clock = Arc::new(DefaultClock);
/// let mut community = Community::with_plaintext_credentials(clock.clone());
/// let outcome = seed_example_data_on_startup(&settings, &mut community, clock)?;
/// assert!(outcome.is_none());
/// # Ok::<(), secudeliv::example_data::StartupSeedingError>(())
/// ```
pub fn seed_example_data_on_startup(
    settings: &ExampleDataSettings,
    community: &mut Community,
    clock: Arc<dyn Clock>,
) -> Result<Option<ExampleDataSeedOutcome>, StartupSeedingError> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry_path = settings.registry_path();
    let registry = load_registry(&registry_path)?;

    let seeder = ExampleDataSeeder::new(clock);
    let outcome = seeder.seed_from_registry(community, &registry, seed_name, settings.count)?;

    match outcome.result {
        SeedingResult::Applied => {
            info!(
                seed_key = %outcome.seed_key,
                resident_count = outcome.resident_count,
                path = %registry_path.display(),
                "example data seeding applied"
            );
        }
        SeedingResult::AlreadySeeded => {
            info!(
                seed_key = %outcome.seed_key,
                resident_count = outcome.resident_count,
                "example data seed already applied; skipping"
            );
        }
    }

    Ok(Some(outcome))
}

fn load_registry(path: &Path) -> Result<SeedRegistry, StartupSeedingError> {
    let read_error = |source: std::io::Error| StartupSeedingError::RegistryRead {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "registry path must be a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    let contents = dir.read_to_string(Path::new(file_name)).map_err(read_error)?;
    Ok(SeedRegistry::from_json(&contents)?)
}
