use chrono::{DateTime, TimeDelta, Utc};

use crate::{error::Result, models::Comment, platform::Platform};

/// The bot's own pinned reply telling the author they have been warned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarningMarker {
    pub id: String,
    pub created: DateTime<Utc>,
}

impl WarningMarker {
    pub fn age(&self, now: DateTime<Utc>) -> TimeDelta {
        now - self.created
    }
}

pub fn is_warning_marker(reply: &Comment, bot: &str) -> bool {
    reply
        .author_name()
        .is_some_and(|author| author.eq_ignore_ascii_case(bot))
        && reply.is_moderator_distinguished()
        && !reply.removed
}

/// First warning marker among `replies`, in the order the platform returned them.
pub fn find_warning(replies: &[Comment], bot: &str) -> Option<WarningMarker> {
    replies
        .iter()
        .find(|reply| is_warning_marker(reply, bot))
        .map(|reply| WarningMarker {
            id: reply.id.clone(),
            created: reply.created,
        })
}

/// Looks for the warning marker under a top-level comment, asking the
/// platform for fresh replies when none were loaded with the tree.
pub async fn locate_warning<P>(platform: &P, comment: &Comment, bot: &str) -> Result<Option<WarningMarker>>
where
    P: Platform + ?Sized,
{
    if comment.replies.is_empty() {
        let replies = platform.refresh_replies(comment).await?;
        return Ok(find_warning(&replies, bot));
    }
    Ok(find_warning(&comment.replies, bot))
}
