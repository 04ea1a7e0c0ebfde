//! Attached files and the ordered collection that holds them.

use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use crate::constants::BYTES_PER_MIB;
use crate::error::{FormError, FormResult};

/// Handle to the bytes behind a user-selected file.
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn read(&self) -> io::Result<Bytes>;
}

/// File on the local filesystem, read lazily at encoding time.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
}

impl LocalFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FileSource for LocalFile {
    async fn read(&self) -> io::Result<Bytes> {
        tokio::fs::read(&self.path).await.map(Bytes::from)
    }
}

/// File whose content is already in memory.
#[derive(Debug, Clone)]
pub struct MemoryFile(pub Bytes);

#[async_trait]
impl FileSource for MemoryFile {
    async fn read(&self) -> io::Result<Bytes> {
        Ok(self.0.clone())
    }
}

/// A selected file plus the metadata the form validates against.
#[derive(Clone)]
pub struct AttachedFile {
    pub name: String,
    pub content_type: String,
    pub size: u64,
    source: Arc<dyn FileSource>,
}

impl fmt::Debug for AttachedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachedFile")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("size", &self.size)
            .finish()
    }
}

impl AttachedFile {
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        size: u64,
        source: Arc<dyn FileSource>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            size,
            source,
        }
    }

    /// Convenience constructor for in-memory content; size is the byte length.
    pub fn from_bytes(
        name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        let data = data.into();
        let size = data.len() as u64;
        Self::new(name, content_type, size, Arc::new(MemoryFile(data)))
    }

    /// Read the file and produce its base64 payload.
    pub async fn encode(&self) -> FormResult<EncodedDocument> {
        let data = self
            .source
            .read()
            .await
            .map_err(|e| FormError::encoding(&self.name, &e))?;

        Ok(EncodedDocument {
            name: self.name.clone(),
            content_type: self.content_type.clone(),
            size: self.size,
            content: general_purpose::STANDARD.encode(&data),
        })
    }

    /// Size in MiB with two decimals, e.g. "1.50 MB".
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / BYTES_PER_MIB as f64)
    }

    pub fn entry(&self) -> FileEntry {
        FileEntry {
            name: self.name.clone(),
            size_label: self.size_label(),
        }
    }
}

/// One rendered row in the file list; the name doubles as the remove key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub size_label: String,
}

/// Attachment as it appears in the submission payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub size: u64,
    /// Base64 payload with no `data:` URI prefix
    pub content: String,
}

impl EncodedDocument {
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        general_purpose::STANDARD.decode(&self.content)
    }
}

/// Ordered set of attached files for one form session.
///
/// Insertion order is display order. Only the intake manager adds files, so
/// the size, type and count limits hold for every member.
#[derive(Debug, Default, Clone)]
pub struct FileCollection {
    files: Vec<AttachedFile>,
}

impl FileCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttachedFile> {
        self.files.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.name.as_str()).collect()
    }

    pub(crate) fn push(&mut self, file: AttachedFile) {
        self.files.push(file);
    }

    /// Remove the first file with this name.
    pub fn remove(&mut self, name: &str) -> Option<AttachedFile> {
        let index = self.files.iter().position(|f| f.name == name)?;
        Some(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}
