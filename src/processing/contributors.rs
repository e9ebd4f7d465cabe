use std::collections::HashSet;

use crate::models::Submission;

/// Authors who replied somewhere in the thread under a top-level comment that
/// is not their own.
///
/// Built once per scan from a fully expanded tree and never mutated after.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Contributors(HashSet<String>);

impl Contributors {
    pub fn build(submission: &Submission) -> Contributors {
        let mut set = HashSet::new();

        for top_level in &submission.comments {
            let Some(owner) = top_level.author_name() else {
                continue;
            };
            set.extend(
                top_level
                    .descendants()
                    .filter_map(|reply| reply.author_name())
                    .filter(|author| *author != owner)
                    .map(str::to_owned),
            );
        }

        Contributors(set)
    }

    pub fn contains(&self, author: &str) -> bool {
        self.0.contains(author)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
