//! UI ports
//!
//! The form never touches a concrete rendering technology. Whatever draws the
//! form (a browser binding, a terminal, a test double) implements `FormView`
//! and turns user actions into `FormEvent`s.

use purchase_core::models::{AttachedFile, FileEntry, FormFields, Identity};

/// Phases of one submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Encoding,
    Sending,
    Success,
    Failed,
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Validating => "validating",
            SubmissionState::Encoding => "encoding",
            SubmissionState::Sending => "sending",
            SubmissionState::Success => "success",
            SubmissionState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// User actions the form reacts to.
#[derive(Debug)]
pub enum FormEvent {
    FilesSelected(Vec<AttachedFile>),
    RemoveFile(String),
    SubmitRequested,
    LoginRequested,
    LogoutRequested,
}

/// Everything the form reads from or writes to its rendered surface.
///
/// Methods take `&self`; implementations keep their own interior state.
pub trait FormView: Send + Sync {
    /// Show the signed-in user (login control hidden, logout and user info
    /// shown) or the signed-out state when `None`.
    fn set_signed_in(&self, identity: Option<&Identity>);

    fn set_form_visible(&self, visible: bool);

    fn append_file_entry(&self, entry: &FileEntry);

    fn remove_file_entry(&self, name: &str);

    fn clear_file_entries(&self);

    /// Clear the file picker so choosing the same file again fires a new selection.
    fn reset_file_picker(&self);

    fn form_fields(&self) -> FormFields;

    fn reset_form(&self);

    /// Disable the submit control and show the busy label, or restore it.
    fn set_submit_busy(&self, busy: bool);

    /// Show the success banner and hide the error banner.
    fn show_success(&self);

    /// Show the error banner with `message` and hide the success banner.
    fn show_error(&self, message: &str);

    fn hide_messages(&self);

    fn scroll_to_status(&self);

    fn on_state(&self, _state: SubmissionState) {}
}
