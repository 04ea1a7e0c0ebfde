//! Test doubles for the form's ports
//!
//! These record every call so tests can assert on what the user would see.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use purchase_core::models::{
    Account, AttachedFile, ClientPrincipal, FileEntry, FormFields, Identity, SubmissionRecord,
};
use purchase_core::{FormError, FormResult};
use purchase_infra::{PrincipalSource, SubmissionSink};

use crate::auth::LoginPopup;
use crate::ports::{FormView, SubmissionState};

/// Snapshot of the rendered form
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub signed_in_as: Option<String>,
    pub form_visible: bool,
    pub file_entries: Vec<FileEntry>,
    pub picker_resets: usize,
    pub fields: FormFields,
    pub form_resets: usize,
    pub submit_busy: bool,
    /// Every value passed to `set_submit_busy`, in order
    pub busy_history: Vec<bool>,
    pub success_visible: bool,
    pub error_visible: bool,
    pub error_text: Option<String>,
    pub scrolls: usize,
    pub states: Vec<SubmissionState>,
}

#[derive(Default)]
pub struct RecordingView {
    state: Mutex<ViewState>,
}

impl RecordingView {
    pub fn with_fields(fields: FormFields) -> Self {
        let view = Self::default();
        view.state.lock().unwrap().fields = fields;
        view
    }

    pub fn set_fields(&self, fields: FormFields) {
        self.state.lock().unwrap().fields = fields;
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.lock().unwrap().clone()
    }

    pub fn entry_names(&self) -> Vec<String> {
        self.snapshot()
            .file_entries
            .into_iter()
            .map(|e| e.name)
            .collect()
    }
}

impl FormView for RecordingView {
    fn set_signed_in(&self, identity: Option<&Identity>) {
        self.state.lock().unwrap().signed_in_as = identity.map(|i| i.label().to_string());
    }

    fn set_form_visible(&self, visible: bool) {
        self.state.lock().unwrap().form_visible = visible;
    }

    fn append_file_entry(&self, entry: &FileEntry) {
        self.state.lock().unwrap().file_entries.push(entry.clone());
    }

    fn remove_file_entry(&self, name: &str) {
        let mut state = self.state.lock().unwrap();
        if let Some(index) = state.file_entries.iter().position(|e| e.name == name) {
            state.file_entries.remove(index);
        }
    }

    fn clear_file_entries(&self) {
        self.state.lock().unwrap().file_entries.clear();
    }

    fn reset_file_picker(&self) {
        self.state.lock().unwrap().picker_resets += 1;
    }

    fn form_fields(&self) -> FormFields {
        self.state.lock().unwrap().fields.clone()
    }

    fn reset_form(&self) {
        let mut state = self.state.lock().unwrap();
        state.fields = FormFields::default();
        state.form_resets += 1;
    }

    fn set_submit_busy(&self, busy: bool) {
        let mut state = self.state.lock().unwrap();
        state.submit_busy = busy;
        state.busy_history.push(busy);
    }

    fn show_success(&self) {
        let mut state = self.state.lock().unwrap();
        state.success_visible = true;
        state.error_visible = false;
    }

    fn show_error(&self, message: &str) {
        let mut state = self.state.lock().unwrap();
        state.error_text = Some(message.to_string());
        state.error_visible = true;
        state.success_visible = false;
    }

    fn hide_messages(&self) {
        let mut state = self.state.lock().unwrap();
        state.success_visible = false;
        state.error_visible = false;
    }

    fn scroll_to_status(&self) {
        self.state.lock().unwrap().scrolls += 1;
    }

    fn on_state(&self, state: SubmissionState) {
        self.state.lock().unwrap().states.push(state);
    }
}

/// Sink that stores submitted records, optionally failing with a status.
#[derive(Default)]
pub struct RecordingSink {
    pub records: Mutex<Vec<SubmissionRecord>>,
    fail_with_status: Option<u16>,
}

impl RecordingSink {
    pub fn failing(status: u16) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            fail_with_status: Some(status),
        }
    }

    pub fn calls(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl SubmissionSink for RecordingSink {
    async fn submit(&self, record: SubmissionRecord) -> FormResult<()> {
        self.records.lock().unwrap().push(record);
        match self.fail_with_status {
            Some(status) => Err(FormError::http_status(status, "mock failure")),
            None => Ok(()),
        }
    }
}

/// Scripted interactive sign-in
pub struct MockLoginPopup {
    pub cached: Vec<Account>,
    pub login_result: Mutex<Option<Account>>,
    pub logins: AtomicUsize,
    pub logouts: AtomicUsize,
}

impl MockLoginPopup {
    pub fn new(login_result: Option<Account>) -> Self {
        Self {
            cached: Vec::new(),
            login_result: Mutex::new(login_result),
            logins: AtomicUsize::new(0),
            logouts: AtomicUsize::new(0),
        }
    }

    pub fn with_cached(account: Account) -> Self {
        let mut popup = Self::new(None);
        popup.cached.push(account);
        popup
    }
}

#[async_trait]
impl LoginPopup for MockLoginPopup {
    fn cached_accounts(&self) -> Vec<Account> {
        self.cached.clone()
    }

    async fn login(&self, _scopes: &[String]) -> Result<Account> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        self.login_result
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| anyhow::anyhow!("popup_window_error: popup blocked"))
    }

    async fn logout(&self, _account: &Account) -> Result<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Principal source returning a fixed answer
pub struct StaticPrincipal(pub Option<ClientPrincipal>);

#[async_trait]
impl PrincipalSource for StaticPrincipal {
    async fn current_principal(&self) -> Result<Option<ClientPrincipal>> {
        Ok(self.0.clone())
    }
}

/// Principal source that always fails
pub struct FailingPrincipal;

#[async_trait]
impl PrincipalSource for FailingPrincipal {
    async fn current_principal(&self) -> Result<Option<ClientPrincipal>> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

pub fn account() -> Account {
    Account {
        name: Some("Ada Lovelace".into()),
        username: "ada@example.com".into(),
        home_account_id: "home-1".into(),
    }
}

pub fn pdf(name: &str) -> AttachedFile {
    AttachedFile::from_bytes(name, "application/pdf", format!("%PDF {name}").into_bytes())
}

pub fn fields(bucket: &str, total_cost: &str) -> FormFields {
    FormFields {
        purchase_value: Some(bucket.to_string()),
        budget: "Facilities".into(),
        items: "Standing desks".into(),
        total_cost: total_cost.to_string(),
        remarks: Some("for the new office".into()),
    }
}
