use crate::models::Submission;

/// Picks the active self-promotion thread out of the top of the feed.
///
/// The thread is pinned while active, so it shows up among the first few hot
/// submissions. The first pinned submission whose title starts with `marker`
/// wins.
pub fn locate_thread(candidates: Vec<Submission>, marker: &str) -> Option<Submission> {
    candidates
        .into_iter()
        .find(|submission| submission.stickied && submission.title.starts_with(marker))
}
