use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use purchase_core::models::{AttachedFile, LocalFile};
use purchase_core::validation::{content_type_for_filename, IntakeReport};
use purchase_core::ErrorMetadata;

/// Describe a file on disk as an attachment. The content type comes from the
/// extension; the bytes are read later, at submit time.
pub async fn attach_path(path: &Path) -> Result<AttachedFile> {
    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("{} has no file name", path.display()))?;
    let content_type = content_type_for_filename(&name);

    Ok(AttachedFile::new(
        name,
        content_type,
        metadata.len(),
        Arc::new(LocalFile::new(path)),
    ))
}

pub async fn attach_paths(paths: &[PathBuf]) -> Result<Vec<AttachedFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(attach_path(path).await?);
    }
    Ok(files)
}

#[derive(Debug, Serialize)]
pub struct AcceptedFile {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: String,
}

#[derive(Debug, Serialize)]
pub struct RejectedFile {
    pub code: &'static str,
    pub message: String,
}

/// Printable form of an intake report
#[derive(Debug, Serialize)]
pub struct IntakeSummary {
    pub accepted: Vec<AcceptedFile>,
    pub rejected: Vec<RejectedFile>,
}

impl From<&IntakeReport> for IntakeSummary {
    fn from(report: &IntakeReport) -> Self {
        Self {
            accepted: report
                .accepted
                .iter()
                .map(|f| AcceptedFile {
                    name: f.name.clone(),
                    content_type: f.content_type.clone(),
                    size: f.size_label(),
                })
                .collect(),
            rejected: report
                .rejected
                .iter()
                .map(|e| RejectedFile {
                    code: e.error_code(),
                    message: e.client_message(),
                })
                .collect(),
        }
    }
}
