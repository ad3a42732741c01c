//! Index Pruner Main Entry Point
//!
//! Deletes every index except `.kibana` from the configured cluster and exits
//! with 0 on success, 1 or 2 for missing configuration, 100 on failure.

use std::env;
use std::process::ExitCode;

use dotenv::dotenv;
use index_pruner::config::env_lookup;
use index_pruner::{run, Dependencies};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("index_pruner=info,index_pruner_repository=info"));

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "index-pruner",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    let status = run(env_lookup, |config| async move {
        Dependencies::new(&config).await.map(|deps| deps.pruner)
    })
    .await;

    ExitCode::from(status.code())
}
