use clap::Parser;
use jobstore::{FilesystemStore, JobStore};
use relay::{Config, Envelope, Relay, RelayError};
use std::sync::Arc;

#[derive(Parser)]
enum CliCommand {
    /// Perform one relay invocation and print the response envelope.
    Invoke,
}

#[tokio::main]
async fn main() {
    let cli = CliCommand::parse();
    init_telemetry();

    match &cli {
        CliCommand::Invoke => {
            let config = Config::from_env();
            let envelope = invoke(&config).await;
            // The envelope is the function's whole contract; it is printed
            // even when it carries an error.
            println!("{}", serde_json::to_string(&envelope).unwrap_or_default());
        }
    }
}

/// One invocation, with every failure folded into the envelope.
async fn invoke(config: &Config) -> Envelope {
    let store: Option<Arc<dyn JobStore>> = match &config.jobs_table {
        Some(dir) => match FilesystemStore::new(dir) {
            Ok(store) => Some(Arc::new(store)),
            Err(e) => {
                tracing::error!(error = %e, dir = %dir, "could not open job table");
                return Envelope::from(&RelayError::Store(e));
            }
        },
        None => None,
    };

    match Relay::new(store) {
        Ok(relay) => relay.run(config).await,
        Err(e) => {
            tracing::error!(error = %e, "could not build HTTP client");
            Envelope::from(&e)
        }
    }
}

fn init_telemetry() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Metrics are exported only when a statsd target is configured; the
    // facade no-ops otherwise.
    if let Ok(host) = std::env::var("STATSD_HOST") {
        let port = std::env::var("STATSD_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8125);

        match metrics_exporter_statsd::StatsdBuilder::from(&host, port).build(Some("relayfn")) {
            Ok(recorder) => {
                if let Err(e) = metrics::set_global_recorder(recorder) {
                    tracing::warn!(error = %e, "metrics recorder already installed");
                }
            }
            Err(e) => tracing::warn!(error = %e, "could not build statsd exporter"),
        }
    }
}
