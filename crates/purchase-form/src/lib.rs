//! Purchase Form
//!
//! Sign-in gating, attachment intake and the submit pipeline of the purchase
//! request form. Rendering is abstracted behind [`FormView`]; user actions
//! arrive as [`FormEvent`]s.

pub mod auth;
pub mod encoding;
pub mod form;
pub mod intake;
pub mod orchestrator;
pub mod ports;

#[cfg(test)]
pub mod test_helpers;

pub use auth::{AuthAdapter, AuthStrategy, LoginPopup};
pub use encoding::encode_documents;
pub use form::{FormSession, PurchaseForm};
pub use intake::FileIntake;
pub use orchestrator::{SubmissionOrchestrator, SubmissionOutcome};
pub use ports::{FormEvent, FormView, SubmissionState};
