use crate::config::Config;
use crate::envelope::Envelope;
use crate::errors::RelayError;
use crate::http::RelayClient;
use crate::metrics_defs::{ERROR_ENVELOPES, INVOCATIONS, JOBS_PERSISTED};
use jobstore::{JobStore, RelayResult, allocate_and_store};
use std::sync::Arc;

/// Drives one GET→POST→persist cycle.
///
/// This struct owns the single top-level error boundary of the invocation:
/// `run` folds every failure into a response envelope and never returns an
/// error itself.
pub struct Relay {
    client: RelayClient,
    store: Option<Arc<dyn JobStore>>,
}

impl Relay {
    pub fn new(store: Option<Arc<dyn JobStore>>) -> Result<Self, RelayError> {
        Ok(Relay {
            client: RelayClient::new()?,
            store,
        })
    }

    pub fn with_client(client: RelayClient, store: Option<Arc<dyn JobStore>>) -> Self {
        Relay { client, store }
    }

    /// Run one invocation.
    pub async fn run(&self, config: &Config) -> Envelope {
        metrics::counter!(INVOCATIONS.name).increment(1);

        match self.relay(config).await {
            Ok(envelope) => envelope,
            Err(err) => {
                metrics::counter!(ERROR_ENVELOPES.name).increment(1);
                tracing::error!(error = %err, "relay failed");
                Envelope::from(&err)
            }
        }
    }

    async fn relay(&self, config: &Config) -> Result<Envelope, RelayError> {
        let (source_url, sink_url) = config.urls()?;

        tracing::info!(url = source_url, "fetching source data");
        let data = self.client.get_json(source_url).await?;
        if data.is_null() {
            tracing::warn!("no data retrieved from source");
            return Err(RelayError::NoData);
        }

        tracing::info!(url = sink_url, "forwarding to sink");
        let (status, body) = self.client.post_json(sink_url, &data).await?;
        tracing::info!(status, "sink accepted relay");

        // Persistence is optional; its outcome never alters the envelope
        // unless it fails, in which case the generic 500 path applies.
        if let Some(store) = &self.store {
            let result = RelayResult {
                status,
                body: body.clone(),
            };
            let job_id = allocate_and_store(store.as_ref(), &result).await?;
            metrics::counter!(JOBS_PERSISTED.name).increment(1);
            tracing::info!(job_id = %job_id, "relay result journaled");
        }

        Ok(Envelope::ok(status, &body)?)
    }
}
