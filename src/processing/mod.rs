pub mod classifier;
pub mod contributors;
pub mod escalation;
pub mod scan;
pub mod thread;
pub mod warning;

pub use scan::{ScanSettings, scan};
