//! Demo entry point.

use host::Services;
use host::config::Config;
use tokio::signal;
use tokio_util::sync::CancellationToken;

/// Cancels `cancel` on SIGINT.
async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    if signal::ctrl_c().await.is_ok() {
        tracing::info!("received SIGINT, cancelling");
        cancel.cancel();
    }
}

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env().expect("invalid configuration");
    host::telemetry::init(&config).expect("failed to install tracing subscriber");

    // 2. Wire the store, event bus and mediator
    let services = Services::new(config.application_settings());

    // 3. Run the walkthrough until it finishes or is interrupted
    let cancel = CancellationToken::new();
    tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    match host::demo::run(&services, &cancel).await {
        Ok(project) => {
            let json = serde_json::to_string_pretty(&project).expect("project serializes");
            println!("{json}");
        }
        Err(err) => {
            tracing::error!(error = %err, "demo failed");
            std::process::exit(1);
        }
    }

    for entry in services.feed.recent(10).await {
        tracing::info!(
            event_type = entry.event_type,
            aggregate_type = entry.aggregate_type,
            summary = %entry.summary,
            "activity"
        );
    }
}
