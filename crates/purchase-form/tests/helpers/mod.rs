//! Test helpers: a capturing view and config wired to a mock server.
//!
//! Run from workspace root: `cargo test -p purchase-form --test submission_flow`.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;

use purchase_core::models::{Account, FileEntry, FormFields, Identity};
use purchase_core::FormConfig;
use purchase_form::{FormView, LoginPopup, SubmissionState};

#[derive(Debug, Default, Clone)]
pub struct Captured {
    pub signed_in_as: Option<String>,
    pub form_visible: bool,
    pub entries: Vec<String>,
    pub fields: FormFields,
    pub busy: bool,
    pub success: bool,
    pub error: Option<String>,
    pub states: Vec<SubmissionState>,
}

#[derive(Default)]
pub struct CapturingView {
    inner: Mutex<Captured>,
}

impl CapturingView {
    pub fn new(fields: FormFields) -> Self {
        let view = Self::default();
        view.inner.lock().unwrap().fields = fields;
        view
    }

    pub fn captured(&self) -> Captured {
        self.inner.lock().unwrap().clone()
    }
}

impl FormView for CapturingView {
    fn set_signed_in(&self, identity: Option<&Identity>) {
        self.inner.lock().unwrap().signed_in_as = identity.map(|i| i.label().to_string());
    }

    fn set_form_visible(&self, visible: bool) {
        self.inner.lock().unwrap().form_visible = visible;
    }

    fn append_file_entry(&self, entry: &FileEntry) {
        self.inner.lock().unwrap().entries.push(entry.name.clone());
    }

    fn remove_file_entry(&self, name: &str) {
        self.inner.lock().unwrap().entries.retain(|e| e != name);
    }

    fn clear_file_entries(&self) {
        self.inner.lock().unwrap().entries.clear();
    }

    fn reset_file_picker(&self) {}

    fn form_fields(&self) -> FormFields {
        self.inner.lock().unwrap().fields.clone()
    }

    fn reset_form(&self) {
        self.inner.lock().unwrap().fields = FormFields::default();
    }

    fn set_submit_busy(&self, busy: bool) {
        self.inner.lock().unwrap().busy = busy;
    }

    fn show_success(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.success = true;
        inner.error = None;
    }

    fn show_error(&self, message: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.success = false;
        inner.error = Some(message.to_string());
    }

    fn hide_messages(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.success = false;
        inner.error = None;
    }

    fn scroll_to_status(&self) {}

    fn on_state(&self, state: SubmissionState) {
        self.inner.lock().unwrap().states.push(state);
    }
}

/// Sign-in that always succeeds with a fixed account.
pub struct FixedLogin(pub Account);

#[async_trait]
impl LoginPopup for FixedLogin {
    fn cached_accounts(&self) -> Vec<Account> {
        Vec::new()
    }

    async fn login(&self, _scopes: &[String]) -> Result<Account> {
        Ok(self.0.clone())
    }

    async fn logout(&self, _account: &Account) -> Result<()> {
        Ok(())
    }
}

pub fn config(server_url: &str, strategy: &str) -> FormConfig {
    let webhook = format!("{}/workflows/purchase", server_url);
    let auth_base = server_url.to_string();
    let strategy = strategy.to_string();
    FormConfig::from_lookup(move |key| match key {
        "WEBHOOK_URL" => Some(webhook.clone()),
        "AUTH_BASE_URL" => Some(auth_base.clone()),
        "AUTH_STRATEGY" => Some(strategy.clone()),
        "REQUEST_TIMEOUT_SECS" => Some("5".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn fields(bucket: &str, total_cost: &str) -> FormFields {
    FormFields {
        purchase_value: Some(bucket.to_string()),
        budget: "Research".into(),
        items: "Oscilloscope".into(),
        total_cost: total_cost.to_string(),
        remarks: None,
    }
}
