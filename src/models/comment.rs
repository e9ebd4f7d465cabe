use chrono::{DateTime, TimeDelta, Utc};

/// Author name the platform substitutes once an account or comment is deleted.
pub const DELETED_SENTINEL: &str = "[deleted]";

/// Collapse code attached to comments whose content was deleted.
pub const DELETED_COLLAPSE_CODE: &str = "DELETED";

/// Distinguish marker of a moderator speaking officially.
pub const MODERATOR: &str = "moderator";

/// Snapshot of one node in a submission's reply tree.
///
/// Comments are never mutated by the scan; moderation happens through the
/// [`Platform`](crate::platform::Platform) and is observed on the next fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comment {
    pub id: String,
    /// Fullname (`t3_...`) of the submission the comment belongs to.
    pub link_id: String,
    pub author: Option<String>,
    pub body: String,
    pub created: DateTime<Utc>,
    pub approved: bool,
    pub removed: bool,
    pub distinguished: Option<String>,
    pub collapsed_reason_code: Option<String>,
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn fullname(&self) -> String {
        format!("t1_{}", self.id)
    }

    /// Author name, or `None` when the author is missing or was deleted.
    pub fn author_name(&self) -> Option<&str> {
        self.author
            .as_deref()
            .filter(|name| !name.is_empty() && *name != DELETED_SENTINEL)
    }

    pub fn is_deleted(&self) -> bool {
        self.author_name().is_none()
            || self.body == DELETED_SENTINEL
            || self.collapsed_reason_code.as_deref() == Some(DELETED_COLLAPSE_CODE)
    }

    pub fn is_moderator_distinguished(&self) -> bool {
        self.distinguished.as_deref() == Some(MODERATOR)
    }

    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.created
    }

    /// Every comment beneath this one, depth first, excluding itself.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.replies.iter().rev().collect(),
        }
    }

    /// First 15 characters of the body, for log lines.
    pub fn excerpt(&self) -> &str {
        match self.body.char_indices().nth(15) {
            Some((idx, _)) => &self.body[..idx],
            None => &self.body,
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Comment>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Comment;

    fn next(&mut self) -> Option<&'a Comment> {
        let next = self.stack.pop()?;
        self.stack.extend(next.replies.iter().rev());
        Some(next)
    }
}
