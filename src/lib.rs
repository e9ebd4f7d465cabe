pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod platform;
pub mod processing;
pub mod utils;

pub use error::{Error, Result};
pub use models::{Comment, ScanReport, Submission};
pub use platform::Platform;
pub use processing::{ScanSettings, scan};
