use serde::Serialize;

use crate::processing::escalation::Decision;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub thread_id: Option<String>,
    pub thread_title: Option<String>,
    pub top_level_comments: usize,
    pub contributors: usize,
    /// False when no thread was found or the activation threshold was not met.
    pub enforcing: bool,
    pub dry_run: bool,
    pub warned: usize,
    pub cleaned_up: usize,
    pub removed: usize,
    pub untouched: usize,
}

impl ScanReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Default::default()
        }
    }

    pub fn record(&mut self, decision: &Decision) {
        match decision {
            Decision::NoOp => self.untouched += 1,
            Decision::Warn => self.warned += 1,
            Decision::Cleanup(_) => self.cleaned_up += 1,
            Decision::Remove(_) => self.removed += 1,
        }
    }

    pub fn actions(&self) -> usize {
        self.warned + self.cleaned_up + self.removed
    }
}
