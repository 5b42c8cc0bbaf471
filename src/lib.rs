pub mod catalog;
pub mod client;
pub mod error;
pub mod models;
pub mod settings;
pub mod validation;

use tracing::{error, info, warn};

use crate::catalog::{EventCatalog, LoadSource};
use crate::settings::Settings;

/// Smoke entry point: build a catalog from the environment, load both lists
/// and print the resulting state as JSON. The site embeds [`EventCatalog`]
/// directly; this exists to exercise the crate against a real backend.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let catalog = EventCatalog::new(&settings);

    // The two lists have no cross-dependency, load them concurrently.
    let (events_result, past_result) =
        futures::join!(catalog.load(), catalog.load_past_events());

    match &events_result {
        Ok(LoadSource::Primary) => {
            info!(count = catalog.events().len(), "loaded events from live endpoint");
        }
        Ok(LoadSource::Fallback) => {
            warn!(count = catalog.events().len(), "loaded events from static fallback");
        }
        Err(err) => error!(error = %err, "no events source reachable"),
    }
    if let Err(err) = &past_result {
        warn!(error = %err, "past events unavailable");
    } else {
        info!(count = catalog.past_events().len(), "loaded past events");
    }

    if let Some(kind) = catalog.last_error() {
        warn!("{}", kind.user_message());
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "events": catalog.events(),
            "pastEvents": catalog.past_events(),
        }))?
    );

    events_result?;
    Ok(())
}
