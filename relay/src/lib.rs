//! Two-step HTTP data relay: fetch JSON from a source endpoint, forward it
//! verbatim to a sink endpoint, and journal the sink's response under a
//! sequential job id.
//!
//! Every invocation, on every code path, answers with a
//! [`Envelope`](envelope::Envelope); failures never escape as raw errors.

pub mod config;
pub mod envelope;
pub mod errors;
pub mod http;
pub mod metrics_defs;
pub mod orchestrator;

pub use config::Config;
pub use envelope::Envelope;
pub use errors::{RelayError, Result};
pub use http::RelayClient;
pub use orchestrator::Relay;

#[cfg(test)]
mod testutils;
