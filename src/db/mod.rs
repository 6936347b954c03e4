pub mod models;
pub mod store;

use mongodb::bson::doc;
use mongodb::{Client, Database};

use crate::config::DbConfig;

/// Connect to MongoDB and verify the deployment answers a ping.
///
/// The returned handle is the one long-lived pooled resource of the
/// process; it is injected into the router state rather than stashed in a
/// global. The driver connects lazily, so the ping is what actually proves
/// the database is reachable before the server starts accepting requests.
pub async fn connect(config: &DbConfig) -> Result<Database, mongodb::error::Error> {
    tracing::info!(database = %config.database, "connecting to MongoDB");

    let client = Client::with_uri_str(&config.uri).await?;
    let db = client.database(&config.database);

    db.run_command(doc! { "ping": 1 }).await?;
    tracing::info!("MongoDB connection established");

    Ok(db)
}

/// Round-trip a ping and report how long the server took to answer.
pub async fn health_check(db: &Database) -> Result<std::time::Duration, mongodb::error::Error> {
    let start = std::time::Instant::now();
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(start.elapsed())
}
