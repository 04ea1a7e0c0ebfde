//! Error types module
//!
//! Every failure the purchase form can run into is a `FormError`. The variants
//! follow the taxonomy the form reports on: authorization, intake, validation,
//! encoding and transport. Each variant knows the single message that is shown
//! in the error banner, so callers never format user-facing text themselves.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like a rejected file
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Coarse category of a `FormError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authorization,
    Intake,
    Validation,
    Encoding,
    Transport,
    Config,
}

/// Metadata describing how an error is presented to the user and the logs.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "FILE_TOO_LARGE")
    fn error_code(&self) -> &'static str;

    /// Category in the form's error taxonomy
    fn kind(&self) -> ErrorKind;

    /// Message shown in the error banner
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("Unauthorized: no signed-in account")]
    Unauthorized,

    #[error("Sign-in failed: {0}")]
    SignInFailed(String),

    #[error("Too many files: at most {max} may be attached")]
    TooManyFiles { max: usize },

    #[error("File too large: {name} ({size} bytes, max {max_mb} MB)")]
    FileTooLarge {
        name: String,
        size: u64,
        max_mb: u64,
    },

    #[error("File type not allowed: {name} ({content_type})")]
    FileTypeNotAllowed { name: String, content_type: String },

    #[error("Duplicate file: {name}")]
    DuplicateFile { name: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to read {name}: {reason}")]
    Encoding { name: String, reason: String },

    #[error("Transport error: {reason}")]
    Transport { status: Option<u16>, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl FormError {
    pub fn validation(message: impl Into<String>) -> Self {
        FormError::Validation(message.into())
    }

    /// Non-2xx response from the webhook.
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        FormError::Transport {
            status: Some(status),
            reason: body.into(),
        }
    }

    /// Network-level failure before any status was received.
    pub fn network(reason: impl Into<String>) -> Self {
        FormError::Transport {
            status: None,
            reason: reason.into(),
        }
    }

    pub fn encoding(name: impl Into<String>, err: &io::Error) -> Self {
        FormError::Encoding {
            name: name.into(),
            reason: err.to_string(),
        }
    }

    /// A payload that could not be serialized for sending.
    pub fn serialization(what: impl Into<String>, err: impl std::fmt::Display) -> Self {
        FormError::Encoding {
            name: what.into(),
            reason: err.to_string(),
        }
    }
}

impl ErrorMetadata for FormError {
    fn error_code(&self) -> &'static str {
        match self {
            FormError::Unauthorized => "UNAUTHORIZED",
            FormError::SignInFailed(_) => "SIGN_IN_FAILED",
            FormError::TooManyFiles { .. } => "TOO_MANY_FILES",
            FormError::FileTooLarge { .. } => "FILE_TOO_LARGE",
            FormError::FileTypeNotAllowed { .. } => "FILE_TYPE_NOT_ALLOWED",
            FormError::DuplicateFile { .. } => "DUPLICATE_FILE",
            FormError::Validation(_) => "VALIDATION_ERROR",
            FormError::Encoding { .. } => "ENCODING_ERROR",
            FormError::Transport { status: Some(_), .. } => "HTTP_STATUS_ERROR",
            FormError::Transport { status: None, .. } => "NETWORK_ERROR",
            FormError::Config(_) => "CONFIG_ERROR",
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            FormError::Unauthorized | FormError::SignInFailed(_) => ErrorKind::Authorization,
            FormError::TooManyFiles { .. }
            | FormError::FileTooLarge { .. }
            | FormError::FileTypeNotAllowed { .. }
            | FormError::DuplicateFile { .. } => ErrorKind::Intake,
            FormError::Validation(_) => ErrorKind::Validation,
            FormError::Encoding { .. } => ErrorKind::Encoding,
            FormError::Transport { .. } => ErrorKind::Transport,
            FormError::Config(_) => ErrorKind::Config,
        }
    }

    fn client_message(&self) -> String {
        match self {
            FormError::Unauthorized => "Please sign in to submit the form.".to_string(),
            FormError::SignInFailed(_) => "Failed to sign in. Please try again.".to_string(),
            FormError::TooManyFiles { max } => format!(
                "Maximum {} files allowed. Please remove some files first.",
                max
            ),
            FormError::FileTooLarge { name, max_mb, .. } => {
                format!("File \"{}\" exceeds {}MB size limit.", name, max_mb)
            }
            FormError::FileTypeNotAllowed { name, .. } => {
                format!("File \"{}\" is not an allowed file type.", name)
            }
            FormError::DuplicateFile { name } => {
                format!("File \"{}\" is already attached.", name)
            }
            FormError::Validation(message) => message.clone(),
            FormError::Encoding { name, .. } => format!("Failed to read file \"{}\".", name),
            FormError::Transport {
                status: Some(status),
                ..
            } => format!("HTTP error! status: {}", status),
            FormError::Transport { status: None, .. } => {
                "Failed to submit the form. Please try again.".to_string()
            }
            FormError::Config(message) => message.clone(),
        }
    }

    fn log_level(&self) -> LogLevel {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Intake | ErrorKind::Authorization => {
                LogLevel::Debug
            }
            ErrorKind::Encoding | ErrorKind::Transport => LogLevel::Warn,
            ErrorKind::Config => LogLevel::Error,
        }
    }
}

/// Result alias used across the purchase crates
pub type FormResult<T> = Result<T, FormError>;
