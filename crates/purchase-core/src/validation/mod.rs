//! Validation modules

pub mod content_type;
pub mod file;
pub mod submission;

pub use content_type::content_type_for_filename;
pub use file::{FilePolicy, IntakeReport};
pub use submission::{parse_total_cost, validate_submission, ValidatedSubmission};
