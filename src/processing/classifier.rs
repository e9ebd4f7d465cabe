use std::{collections::HashSet, fmt};

use crate::models::Comment;

/// Authors exempt from enforcement whatever they post.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OverrideList(HashSet<String>);

impl OverrideList {
    pub fn contains(&self, author: &str) -> bool {
        self.0.contains(&normalize(author))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for OverrideList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        OverrideList(
            iter.into_iter()
                .map(|name| normalize(name.as_ref()))
                .filter(|name| !name.is_empty())
                .collect(),
        )
    }
}

// Usernames are case-insensitive and often written as u/name.
fn normalize(name: &str) -> String {
    let name = name.trim();
    let name = name
        .strip_prefix("/u/")
        .or_else(|| name.strip_prefix("u/"))
        .unwrap_or(name);
    name.to_lowercase()
}

/// Why a top-level comment is left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exemption {
    Approved,
    Moderator,
    Removed,
    Deleted,
    Overridden,
}

impl fmt::Display for Exemption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Exemption::Approved => "approved",
            Exemption::Moderator => "moderator comment",
            Exemption::Removed => "already removed",
            Exemption::Deleted => "deleted",
            Exemption::Overridden => "on override list",
        })
    }
}

/// Decides whether a top-level comment is subject to enforcement.
///
/// Moderation flags change between scans, so this is evaluated fresh every
/// time rather than cached.
pub fn classify(comment: &Comment, overrides: &OverrideList) -> Result<(), Exemption> {
    if comment.is_deleted() {
        return Err(Exemption::Deleted);
    }
    if comment.approved {
        return Err(Exemption::Approved);
    }
    if comment.is_moderator_distinguished() {
        return Err(Exemption::Moderator);
    }
    if comment.removed {
        return Err(Exemption::Removed);
    }
    match comment.author_name() {
        Some(author) if overrides.contains(author) => Err(Exemption::Overridden),
        Some(_) => Ok(()),
        None => Err(Exemption::Deleted),
    }
}

pub fn is_actionable(comment: &Comment, overrides: &OverrideList) -> bool {
    classify(comment, overrides).is_ok()
}
