pub mod comment;
pub mod stats;
pub mod submission;

pub use comment::Comment;
pub use stats::ScanReport;
pub use submission::Submission;
