//! Capabilities the bot needs from the social platform.
//!
//! [`RedditClient`] talks to the live API; tests provide an in-memory double.

mod expand;
pub mod reddit;
mod wire;

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{Comment, Submission},
};

pub use reddit::{Credentials, RedditClient};

/// Who can read a removal notice sent by [`Platform::send_removal_message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum NoticeKind {
    /// Posted as a public reply under the removed comment.
    Public,
    /// Delivered as a private message from the moderation team.
    #[default]
    Private,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Public => "public",
            NoticeKind::Private => "private",
        }
    }
}

impl std::fmt::Display for NoticeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalNotice {
    pub title: String,
    pub message: String,
    pub kind: NoticeKind,
}

#[async_trait]
pub trait Platform: Send + Sync {
    /// Name of the account the bot acts as.
    async fn me(&self) -> Result<String>;

    /// Highest ranked submissions of a community, without their comments.
    async fn hot(&self, community: &str, limit: usize) -> Result<Vec<Submission>>;

    /// Top-level comments of a submission with every placeholder expanded.
    async fn comment_tree(&self, submission: &Submission) -> Result<Vec<Comment>>;

    /// Direct replies of a comment, fetched fresh from the platform.
    async fn refresh_replies(&self, comment: &Comment) -> Result<Vec<Comment>>;

    /// Posts a reply and returns the new comment's id.
    async fn reply(&self, parent: &Comment, body: &str) -> Result<String>;

    /// Marks a comment as an official moderator comment, optionally pinned.
    async fn distinguish(&self, comment_id: &str, sticky: bool) -> Result<()>;

    async fn ignore_reports(&self, comment_id: &str) -> Result<()>;

    async fn remove(&self, comment_id: &str, mod_note: Option<&str>) -> Result<()>;

    async fn approve(&self, comment_id: &str) -> Result<()>;

    async fn send_removal_message(&self, comment_id: &str, notice: &RemovalNotice) -> Result<()>;
}
