//! Community entry-point: configures tracing, loads example data, and reports
//! the resulting community state.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use secudeliv::Community;
use secudeliv::example_data::{ExampleDataSettings, seed_example_data_on_startup};

fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ExampleDataSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;

    let clock = Arc::new(DefaultClock);
    let mut community = Community::with_plaintext_credentials(clock.clone());
    seed_example_data_on_startup(&settings, &mut community, clock)
        .wrap_err("example data seeding failed")?;

    info!(
        accounts = community.registry().list_all().len(),
        pending_registrations = community.registry().list_pending().len(),
        broadcasts = community.notices().broadcasts().len(),
        invitations = community.notices().invitations().len(),
        "community ready"
    );
    Ok(())
}
