//! Resolution of "more" placeholders into the comments they stand for.
use async_trait::async_trait;
use tracing::{debug, warn};

use super::wire::{Forest, RawMore, Thing};
use crate::{error::Result, models::Comment};

/// Largest number of ids `/api/morechildren` accepts per request.
const MORE_CHILDREN_BATCH: usize = 100;

/// Where the comments hidden behind placeholders are fetched from.
#[async_trait]
pub(crate) trait CommentSource: Send + Sync {
    /// Comment listing of `link_id` focused on one of its comments.
    async fn subtree(&self, link_id: &str, comment_id: &str) -> Result<Forest>;

    /// Comments with the given ids, in no particular nesting.
    async fn more_children(&self, link_id: &str, ids: &[String]) -> Result<Vec<Thing>>;
}

/// Expands every placeholder of `forest`, including the ones that only show
/// up after an earlier expansion.
pub(crate) async fn expand_all<S>(source: &S, link_id: &str, mut forest: Forest) -> Result<Vec<Comment>>
where
    S: CommentSource + ?Sized,
{
    let mut pending = std::mem::take(&mut forest.more);
    while let Some(placeholder) = pending.pop() {
        expand(source, link_id, placeholder, &mut forest, &mut pending).await?;
    }
    Ok(forest.comments)
}

async fn expand<S>(
    source: &S,
    link_id: &str,
    placeholder: RawMore,
    forest: &mut Forest,
    pending: &mut Vec<RawMore>,
) -> Result<()>
where
    S: CommentSource + ?Sized,
{
    if placeholder.is_continuation() {
        let parent = placeholder.parent_id.trim_start_matches("t1_");
        let mut subtree = source.subtree(link_id, parent).await?;
        pending.append(&mut subtree.more);
        let replies = subtree
            .comments
            .into_iter()
            .find(|c| c.id == parent)
            .map(|c| c.replies)
            .unwrap_or_default();
        match forest.find_mut(&placeholder.parent_id) {
            Some(node) => node.replies.extend(replies),
            None => warn!(parent = %placeholder.parent_id, "dropping thread continuation with unknown parent"),
        }
        return Ok(());
    }

    debug!(parent = %placeholder.parent_id, count = placeholder.count, "expanding placeholder");
    for batch in placeholder.children.chunks(MORE_CHILDREN_BATCH) {
        for thing in source.more_children(link_id, batch).await? {
            match thing {
                Thing::Comment(raw) => {
                    let parent_id = raw.parent_id.clone();
                    let comment = (*raw).into_comment(pending);
                    if let Err(orphan) = forest.graft(&parent_id, comment) {
                        warn!(comment = %orphan.id, parent = %parent_id, "dropping comment with unknown parent");
                    }
                }
                Thing::More(more) => pending.push(more),
                Thing::Link(_) | Thing::Listing(_) => {}
            }
        }
    }
    Ok(())
}
