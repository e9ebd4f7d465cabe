//! One enforcement pass over the current self-promotion thread.
//!
//! A scan keeps no state between runs: everything is derived from the live
//! comment tree, so running it again before anything changed repeats the same
//! no-op decisions. Writes are best effort. A moderator acting between our
//! read and our write (removing a comment by hand, say) is not detected.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::{
    classifier::{OverrideList, classify},
    contributors::Contributors,
    escalation::{Assessment, Decision, Thresholds},
    thread::locate_thread,
    warning::locate_warning,
};
use crate::{
    error::Result,
    models::{Comment, ScanReport},
    platform::{NoticeKind, Platform, RemovalNotice},
    utils::MessageTemplate,
};

pub const REMOVAL_NOTE: &str = "OP did not participate in thread.";
pub const CLEANUP_NOTE: &str = "OP participated in thread, removed warning.";
pub const REMOVAL_TITLE: &str = "Lack of contribution";

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub community: String,
    pub title_marker: String,
    /// How many hot submissions to search for the pinned thread.
    pub hot_limit: usize,
    /// Decide and log, but never call a mutating platform endpoint.
    pub dry_run: bool,
    pub thresholds: Thresholds,
    pub overrides: OverrideList,
    pub warning_template: MessageTemplate,
    pub removal_template: MessageTemplate,
    /// Delivery of the notice sent with a removal.
    pub removal_notice: NoticeKind,
}

pub async fn scan<P>(platform: &P, settings: &ScanSettings, now: DateTime<Utc>) -> Result<ScanReport>
where
    P: Platform + ?Sized,
{
    let mut report = ScanReport::new(settings.dry_run);

    let candidates = platform.hot(&settings.community, settings.hot_limit).await?;
    let Some(thread) = locate_thread(candidates, &settings.title_marker) else {
        info!(community = %settings.community, "no active self-promotion thread");
        return Ok(report);
    };
    report.thread_id = Some(thread.id.clone());
    report.thread_title = Some(thread.title.clone());

    let comments = platform.comment_tree(&thread).await?;
    let submission = thread.with_comments(comments);
    report.top_level_comments = submission.comments.len();

    let contributors = Contributors::build(&submission);
    report.contributors = contributors.len();
    info!(
        thread = %submission.id,
        top_level = submission.comments.len(),
        contributors = contributors.len(),
        "loaded self-promotion thread"
    );

    // wait until there's a minimum set of top-level comments before enforcing
    if submission.comments.len() < settings.thresholds.min_top_level_comments {
        info!(
            required = settings.thresholds.min_top_level_comments,
            "below activation threshold, not enforcing"
        );
        return Ok(report);
    }
    report.enforcing = true;

    let bot = platform.me().await?;
    let enforcer = Enforcer {
        platform,
        settings,
        contributors: &contributors,
        bot: &bot,
        now,
    };
    for comment in &submission.comments {
        let decision = enforcer.process(comment).await?;
        report.record(&decision);
    }

    Ok(report)
}

struct Enforcer<'a, P: ?Sized> {
    platform: &'a P,
    settings: &'a ScanSettings,
    contributors: &'a Contributors,
    bot: &'a str,
    now: DateTime<Utc>,
}

impl<P> Enforcer<'_, P>
where
    P: Platform + ?Sized,
{
    async fn process(&self, comment: &Comment) -> Result<Decision> {
        if let Err(exemption) = classify(comment, &self.settings.overrides) {
            debug!(comment = %comment.id, %exemption, "skipping");
            return Ok(Decision::NoOp);
        }
        let Some(author) = comment.author_name() else {
            return Ok(Decision::NoOp);
        };

        let contributed = self.contributors.contains(author);
        let warning = locate_warning(self.platform, comment, self.bot).await?;
        let assessment = Assessment::new(comment, contributed, warning, self.now);
        let decision = self.settings.thresholds.decide(assessment);

        self.apply(&decision, comment, author).await?;
        Ok(decision)
    }

    async fn apply(&self, decision: &Decision, comment: &Comment, author: &str) -> Result<()> {
        self.log(decision, comment, author);
        let hours = self.settings.thresholds.remove_after_hours().to_string();
        let live = !self.settings.dry_run;

        match decision {
            Decision::NoOp => {}
            Decision::Warn => {
                let text = self
                    .settings
                    .warning_template
                    .render(&[("author", author), ("hours", hours.as_str())])?;
                if live {
                    let reply = self.platform.reply(comment, &text).await?;
                    self.platform.distinguish(&reply, true).await?;
                    self.platform.ignore_reports(&reply).await?;
                }
            }
            Decision::Cleanup(marker) => {
                if live {
                    self.platform.approve(&comment.id).await?;
                    self.platform.remove(&marker.id, Some(CLEANUP_NOTE)).await?;
                }
            }
            Decision::Remove(marker) => {
                let notice = RemovalNotice {
                    title: REMOVAL_TITLE.to_owned(),
                    message: self.settings.removal_template.render(&[("hours", hours.as_str())])?,
                    kind: self.settings.removal_notice,
                };
                if live {
                    self.platform.remove(&marker.id, None).await?;
                    self.platform.remove(&comment.id, Some(REMOVAL_NOTE)).await?;
                    self.platform.send_removal_message(&comment.id, &notice).await?;
                }
            }
        }
        Ok(())
    }

    fn log(&self, decision: &Decision, comment: &Comment, author: &str) {
        let marker = if self.settings.dry_run { "*" } else { "" };
        let excerpt = comment.excerpt();
        info!(
            action = %decision,
            author,
            excerpt,
            comment = %comment.id,
            dry_run = self.settings.dry_run,
            "{marker}{decision}: {author} '{excerpt}...' ({})",
            comment.id
        );
    }
}

