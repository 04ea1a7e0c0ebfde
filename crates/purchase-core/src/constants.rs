//! Limits and fixed labels shared across the purchase crates.

/// Maximum number of attached files per form session
pub const MAX_FILES: usize = 10;

/// Maximum size of a single attached file, in MiB
pub const MAX_FILE_SIZE_MB: u64 = 10;

pub const BYTES_PER_MIB: u64 = 1024 * 1024;

/// Total cost must be strictly below this value
pub const TOTAL_COST_CEILING: f64 = 6001.0;

/// Permission scope requested by the interactive sign-in
pub const LOGIN_SCOPE: &str = "User.Read";

/// Path of the platform "current principal" endpoint used by delegated sessions
pub const AUTH_ME_PATH: &str = "/.auth/me";

pub const SUBMIT_LABEL: &str = "Submit";
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// Content types accepted for attachments: office documents, PDF, images, video, audio.
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-powerpoint",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "application/pdf",
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "video/mp4",
    "video/quicktime",
    "audio/mpeg",
    "audio/wav",
];
