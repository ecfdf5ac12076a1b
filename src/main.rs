//! Environment smoke check
//!
//! Opens a session against the configured base URL, waits for the home
//! screen landmark, drops a screenshot artifact, and closes. Exits nonzero
//! on any harness error, so CI can gate the real suites on a working
//! browser + network setup.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tubecheck::flows::home;
use tubecheck::{Session, load_config, screenshot};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    info!(base_url = %config.base_url, headless = config.headless, "starting smoke check");

    let session = Session::open(&config, &config.base_url).await?;

    let result = async {
        let url = home::open_home(&session, &config.base_url).await?;
        info!(%url, "home screen landmark visible");
        let artifact =
            screenshot::capture(session.page(), &config.artifacts_dir, "smoke-home").await?;
        info!(artifact = %artifact.display(), "smoke check passed");
        Ok::<_, tubecheck::HarnessError>(())
    }
    .await;

    // Teardown runs on both paths; a failed smoke check must not leak a
    // browser process.
    session.close().await?;
    result?;
    Ok(())
}
