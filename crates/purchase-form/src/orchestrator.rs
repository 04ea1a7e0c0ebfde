//! Submission orchestrator
//!
//! One submit attempt runs `Validating -> Encoding -> Sending` and ends in
//! `Success` or `Failed`, after which the form is back to `Idle`. While an
//! attempt is in flight the submit control is busy; it is restored on every
//! exit path by `BusyGuard`.

use chrono::Utc;
use std::sync::Arc;

use purchase_core::models::{FileCollection, SubmissionRecord};
use purchase_core::validation::validate_submission;
use purchase_core::{AuthStrategyKind, ErrorMetadata, FormError, FormResult, LogLevel};
use purchase_infra::SubmissionSink;

use crate::auth::AuthAdapter;
use crate::encoding::encode_documents;
use crate::ports::{FormView, SubmissionState};

/// Result of one submit attempt.
#[derive(Debug)]
pub enum SubmissionOutcome {
    Submitted,
    Rejected(FormError),
}

impl SubmissionOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmissionOutcome::Submitted)
    }

    pub fn error(&self) -> Option<&FormError> {
        match self {
            SubmissionOutcome::Submitted => None,
            SubmissionOutcome::Rejected(e) => Some(e),
        }
    }
}

/// Marks the submit control busy for as long as it lives.
struct BusyGuard<'a> {
    view: &'a dyn FormView,
}

impl<'a> BusyGuard<'a> {
    fn engage(view: &'a dyn FormView) -> Self {
        view.set_submit_busy(true);
        Self { view }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.view.set_submit_busy(false);
    }
}

pub struct SubmissionOrchestrator {
    sink: Arc<dyn SubmissionSink>,
}

impl SubmissionOrchestrator {
    pub fn new(sink: Arc<dyn SubmissionSink>) -> Self {
        Self { sink }
    }

    #[tracing::instrument(skip_all, fields(files = files.len(), strategy = ?auth.kind()))]
    pub async fn submit(
        &self,
        auth: &AuthAdapter,
        files: &mut FileCollection,
        view: &dyn FormView,
    ) -> SubmissionOutcome {
        // Signed-out interactive users are turned away before the control goes busy.
        if auth.kind() == AuthStrategyKind::Interactive && !auth.is_signed_in() {
            return self.fail(FormError::Unauthorized, view);
        }

        let _busy = BusyGuard::engage(view);
        view.hide_messages();

        match self.run(auth, files, view).await {
            Ok(()) => {
                transition(view, SubmissionState::Success);
                view.show_success();
                view.scroll_to_status();
                view.reset_form();
                files.clear();
                view.clear_file_entries();
                transition(view, SubmissionState::Idle);
                SubmissionOutcome::Submitted
            }
            Err(e) => self.fail(e, view),
        }
    }

    async fn run(
        &self,
        auth: &AuthAdapter,
        files: &FileCollection,
        view: &dyn FormView,
    ) -> FormResult<()> {
        transition(view, SubmissionState::Validating);
        let fields = view.form_fields();
        let validated = validate_submission(&fields, files.len())?;
        let identity = auth.identity_for_submit()?;

        transition(view, SubmissionState::Encoding);
        let documents = encode_documents(files).await?;

        transition(view, SubmissionState::Sending);
        let record = SubmissionRecord::new(
            Utc::now(),
            &identity,
            &fields,
            validated.total_cost,
            documents,
        );
        tracing::info!(
            purchase_value = %validated.bucket.label(),
            total_cost = validated.total_cost,
            documents = record.documents.len(),
            user = %record.user.id,
            "Sending submission"
        );
        self.sink.submit(record).await
    }

    fn fail(&self, error: FormError, view: &dyn FormView) -> SubmissionOutcome {
        log_error(&error);
        transition(view, SubmissionState::Failed);
        view.show_error(&error.client_message());
        view.scroll_to_status();
        transition(view, SubmissionState::Idle);
        SubmissionOutcome::Rejected(error)
    }
}

fn transition(view: &dyn FormView, state: SubmissionState) {
    tracing::debug!(state = %state, "Submission state");
    view.on_state(state);
}

fn log_error(error: &FormError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_code = code, "Submission rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_code = code, "Submission rejected");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_code = code, "Submission rejected");
        }
    }
}
