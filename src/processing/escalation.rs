use std::fmt;

use chrono::{DateTime, TimeDelta, Utc};

use super::warning::WarningMarker;
use crate::models::Comment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Age a top-level comment must reach before it is warned or cleaned up.
    pub warn_after: TimeDelta,
    /// Age both the comment and its warning must reach before removal.
    pub remove_after: TimeDelta,
    /// Top-level comments required before any enforcement starts.
    pub min_top_level_comments: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            warn_after: TimeDelta::minutes(5),
            remove_after: TimeDelta::minutes(120),
            min_top_level_comments: 5,
        }
    }
}

impl Thresholds {
    /// Grace period quoted to authors, in whole hours.
    pub fn remove_after_hours(&self) -> i64 {
        self.remove_after.num_hours()
    }

    pub fn decide(&self, assessment: Assessment) -> Decision {
        let Assessment {
            age,
            contributed,
            warning,
        } = assessment;

        match warning {
            // The warning's own age gates removal: the thread may have sat
            // below the activation threshold for longer than the grace period.
            Some((marker, warned_for))
                if !contributed && age >= self.remove_after && warned_for >= self.remove_after =>
            {
                Decision::Remove(marker)
            }
            Some((marker, _)) if contributed && age >= self.warn_after => Decision::Cleanup(marker),
            None if !contributed && age >= self.warn_after => Decision::Warn,
            _ => Decision::NoOp,
        }
    }
}

/// Everything the state machine needs to know about one top-level comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assessment {
    pub age: TimeDelta,
    pub contributed: bool,
    /// Current warning marker and how long it has existed.
    pub warning: Option<(WarningMarker, TimeDelta)>,
}

impl Assessment {
    pub fn new(comment: &Comment, contributed: bool, warning: Option<WarningMarker>, now: DateTime<Utc>) -> Self {
        Self {
            age: comment.age(now),
            contributed,
            warning: warning.map(|marker| {
                let age = marker.age(now);
                (marker, age)
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    NoOp,
    Warn,
    Cleanup(WarningMarker),
    Remove(WarningMarker),
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Decision::NoOp => "No-op",
            Decision::Warn => "Warn",
            Decision::Cleanup(_) => "Cleanup",
            Decision::Remove(_) => "Remove",
        })
    }
}
