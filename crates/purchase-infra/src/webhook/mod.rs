//! Delivery of submission records to the workflow webhook.

mod client;

use async_trait::async_trait;
use purchase_core::models::SubmissionRecord;
use purchase_core::FormResult;

pub use client::{WebhookClient, WebhookClientConfig, WebhookResponse};

/// Destination for a fully assembled submission.
///
/// Ownership of the record moves into the sink; it is never kept locally.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    async fn submit(&self, record: SubmissionRecord) -> FormResult<()>;
}
