//! File intake manager
//!
//! Applies the attachment policy to each selection and keeps the rendered
//! file list in step with the session's collection.

use purchase_core::models::{AttachedFile, FileCollection};
use purchase_core::validation::{FilePolicy, IntakeReport};
use purchase_core::{ErrorMetadata, IntakeConfig};

use crate::ports::FormView;

#[derive(Debug, Clone)]
pub struct FileIntake {
    policy: FilePolicy,
}

impl FileIntake {
    pub fn new(config: IntakeConfig) -> Self {
        Self {
            policy: FilePolicy::new(config),
        }
    }

    /// Handle one file-picker selection.
    ///
    /// Every rejection is shown in turn, so the last one stays visible. The
    /// picker is reset in all cases.
    pub fn on_files_selected(
        &self,
        collection: &mut FileCollection,
        candidates: Vec<AttachedFile>,
        view: &dyn FormView,
    ) -> IntakeReport {
        let selected = candidates.len();
        let report = self.policy.admit(collection, candidates);

        for file in &report.accepted {
            view.append_file_entry(&file.entry());
        }
        for rejection in &report.rejected {
            view.show_error(&rejection.client_message());
        }
        view.reset_file_picker();

        tracing::info!(
            selected,
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            attached = collection.len(),
            "Processed file selection"
        );

        report
    }

    /// Remove an attachment by name. Returns `false` when nothing matched.
    pub fn remove_file(
        &self,
        collection: &mut FileCollection,
        name: &str,
        view: &dyn FormView,
    ) -> bool {
        match collection.remove(name) {
            Some(_) => {
                view.remove_file_entry(name);
                tracing::debug!(file = %name, remaining = collection.len(), "Removed attachment");
                true
            }
            None => false,
        }
    }

    /// Drop every attachment and its rendered entry.
    pub fn clear(&self, collection: &mut FileCollection, view: &dyn FormView) {
        collection.clear();
        view.clear_file_entries();
    }
}
