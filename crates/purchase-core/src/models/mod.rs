//! Domain models for the purchase form

pub mod file;
pub mod identity;
pub mod submission;

pub use file::{
    AttachedFile, EncodedDocument, FileCollection, FileEntry, FileSource, LocalFile, MemoryFile,
};
pub use identity::{Account, AuthMeResponse, ClientPrincipal, Identity};
pub use submission::{FormFields, PurchaseBucket, SubmissionRecord, SubmissionUser};
