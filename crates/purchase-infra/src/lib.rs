//! Purchase Infra Library
//!
//! Outbound HTTP collaborators of the purchase form (the workflow webhook and
//! the platform identity endpoint) plus tracing setup.

pub mod identity;
pub mod telemetry;
pub mod webhook;

pub use identity::{PrincipalClient, PrincipalSource};
pub use telemetry::{init_telemetry, LogFormat};
pub use webhook::{SubmissionSink, WebhookClient, WebhookClientConfig, WebhookResponse};
