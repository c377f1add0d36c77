//! MongoDB client setup and connection verification.

use std::time::Duration;

use bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::config::{Config, mask_connection_string};
use crate::error::AppError;

/// Opens a client and returns a handle to the configured database.
///
/// Parses the connection string into driver options, applies the configured
/// timeouts, then verifies reachability with a `ping` command retried with
/// exponential backoff. No operations should run against a handle that was
/// never returned from here.
///
/// # Errors
///
/// Returns [`AppError::Database`] if the URI cannot be parsed or the ping
/// still fails after the configured number of attempts.
pub async fn connect(config: &Config) -> Result<Database, AppError> {
    let mut options = ClientOptions::parse(&config.mongodb_uri).await?;
    options.app_name = Some("restaurant-catalog".to_string());
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    let client = Client::with_options(options)?;
    let database = client.database(&config.database);

    let strategy = ExponentialBackoff::from_millis(10)
        .map(jitter)
        .take(config.ping_retries.saturating_sub(1));

    Retry::spawn(strategy, || async {
        database.run_command(doc! { "ping": 1 }).await
    })
    .await?;

    tracing::info!(
        "Connected to {} (database: {})",
        mask_connection_string(&config.mongodb_uri),
        config.database
    );

    Ok(database)
}
