//! Renders the form to the terminal.

use std::sync::Mutex;

use purchase_core::constants::{SUBMITTING_LABEL, SUBMIT_LABEL};
use purchase_core::models::{FileEntry, FormFields, Identity};
use purchase_form::{FormView, SubmissionState};

pub const SUCCESS_MESSAGE: &str = "Purchase request submitted successfully.";

/// Form view backed by fixed field values. Every line written is also kept
/// in a transcript.
pub struct TerminalView {
    fields: Mutex<FormFields>,
    transcript: Mutex<Vec<String>>,
    echo: bool,
}

impl TerminalView {
    pub fn new(fields: FormFields) -> Self {
        Self {
            fields: Mutex::new(fields),
            transcript: Mutex::new(Vec::new()),
            echo: true,
        }
    }

    /// A view that records without printing.
    pub fn silent(fields: FormFields) -> Self {
        Self {
            echo: false,
            ..Self::new(fields)
        }
    }

    pub fn transcript(&self) -> Vec<String> {
        self.transcript
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    fn out(&self, line: String) {
        if self.echo {
            println!("{}", line);
        }
        if let Ok(mut lines) = self.transcript.lock() {
            lines.push(line);
        }
    }

    fn err(&self, line: String) {
        if self.echo {
            eprintln!("{}", line);
        }
        if let Ok(mut lines) = self.transcript.lock() {
            lines.push(line);
        }
    }
}

impl FormView for TerminalView {
    fn set_signed_in(&self, identity: Option<&Identity>) {
        match identity {
            Some(identity) => self.err(format!("Signed in as: {}", identity.label())),
            None => tracing::debug!("Signed out"),
        }
    }

    fn set_form_visible(&self, visible: bool) {
        tracing::debug!(visible, "Form visibility");
    }

    fn append_file_entry(&self, entry: &FileEntry) {
        self.out(format!("  + {} ({})", entry.name, entry.size_label));
    }

    fn remove_file_entry(&self, name: &str) {
        self.out(format!("  - {}", name));
    }

    fn clear_file_entries(&self) {
        tracing::debug!("File list cleared");
    }

    fn reset_file_picker(&self) {}

    fn form_fields(&self) -> FormFields {
        self.fields
            .lock()
            .map(|fields| fields.clone())
            .unwrap_or_default()
    }

    fn reset_form(&self) {
        if let Ok(mut fields) = self.fields.lock() {
            *fields = FormFields::default();
        }
    }

    fn set_submit_busy(&self, busy: bool) {
        let label = if busy { SUBMITTING_LABEL } else { SUBMIT_LABEL };
        if busy {
            self.err(label.to_string());
        } else {
            tracing::debug!(label, "Submit control restored");
        }
    }

    fn show_success(&self) {
        self.out(SUCCESS_MESSAGE.to_string());
    }

    fn show_error(&self, message: &str) {
        self.err(format!("Error: {}", message));
    }

    fn hide_messages(&self) {}

    fn scroll_to_status(&self) {}

    fn on_state(&self, state: SubmissionState) {
        tracing::debug!(state = %state, "Submission state changed");
    }
}
