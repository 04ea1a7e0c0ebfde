//! Selection-time rules for attachments.
//!
//! The count limit applies to a whole selection at once: a batch that would
//! overflow the cap is refused entirely. Size, type and name checks apply to
//! each file on its own, so one bad file does not block the rest.

use crate::config::IntakeConfig;
use crate::error::{FormError, FormResult};
use crate::models::{AttachedFile, FileCollection};

/// Accepted and rejected files of one selection.
#[derive(Debug, Default)]
pub struct IntakeReport {
    pub accepted: Vec<AttachedFile>,
    pub rejected: Vec<FormError>,
}

impl IntakeReport {
    /// True when the batch was refused as a unit by the count limit.
    pub fn count_exceeded(&self) -> bool {
        self.rejected
            .iter()
            .any(|e| matches!(e, FormError::TooManyFiles { .. }))
    }
}

/// Validator for attachments
#[derive(Debug, Clone)]
pub struct FilePolicy {
    config: IntakeConfig,
}

impl FilePolicy {
    pub fn new(config: IntakeConfig) -> Self {
        Self { config }
    }

    pub fn validate_count(&self, current: usize, incoming: usize) -> FormResult<()> {
        if current + incoming > self.config.max_files {
            return Err(FormError::TooManyFiles {
                max: self.config.max_files,
            });
        }
        Ok(())
    }

    pub fn validate_file_size(&self, file: &AttachedFile) -> FormResult<()> {
        if file.size > self.config.max_file_size_bytes {
            return Err(FormError::FileTooLarge {
                name: file.name.clone(),
                size: file.size,
                max_mb: self.config.max_file_size_mb(),
            });
        }
        Ok(())
    }

    pub fn validate_content_type(&self, file: &AttachedFile) -> FormResult<()> {
        let normalized = file.content_type.to_lowercase();
        if !self
            .config
            .allowed_content_types
            .iter()
            .any(|ct| ct == &normalized)
        {
            return Err(FormError::FileTypeNotAllowed {
                name: file.name.clone(),
                content_type: file.content_type.clone(),
            });
        }
        Ok(())
    }

    pub fn validate_file(&self, file: &AttachedFile) -> FormResult<()> {
        self.validate_file_size(file)?;
        self.validate_content_type(file)
    }

    /// Apply a selection to `collection`, returning what was accepted and why
    /// the rest was refused.
    pub fn admit(
        &self,
        collection: &mut FileCollection,
        candidates: Vec<AttachedFile>,
    ) -> IntakeReport {
        let mut report = IntakeReport::default();

        if let Err(e) = self.validate_count(collection.len(), candidates.len()) {
            report.rejected.push(e);
            return report;
        }

        for file in candidates {
            let outcome = self.validate_file(&file).and_then(|_| {
                if collection.contains(&file.name) {
                    Err(FormError::DuplicateFile {
                        name: file.name.clone(),
                    })
                } else {
                    Ok(())
                }
            });

            match outcome {
                Ok(()) => {
                    collection.push(file.clone());
                    report.accepted.push(file);
                }
                Err(e) => {
                    tracing::debug!(file = %file.name, error = %e, "Rejected attachment");
                    report.rejected.push(e);
                }
            }
        }

        report
    }
}
