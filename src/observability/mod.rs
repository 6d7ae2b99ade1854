//! Observability infrastructure for the Slack client.
//!
//! Provides metrics and log redaction utilities. Events are emitted through
//! `tracing`; installing a subscriber is left to the application.

pub mod logging;
pub mod metrics;

pub use logging::*;
pub use metrics::*;
