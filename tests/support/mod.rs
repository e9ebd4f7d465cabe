//! In-memory platform double. Mutating calls are recorded and applied to the
//! stored tree so that a later scan sees what an earlier one did.
#![allow(dead_code)]

use std::{collections::HashSet, sync::Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use self_promo_bot::{
    Comment, Result, ScanSettings, Submission,
    models::comment::MODERATOR,
    platform::{NoticeKind, Platform, RemovalNotice},
    processing::{classifier::OverrideList, escalation::Thresholds},
    utils::MessageTemplate,
};

pub const BOT: &str = "SelfPromoBot";
pub const TITLE: &str = "Self-Promotion Roundup - March";

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Reply { parent: String, body: String },
    Distinguish { id: String, sticky: bool },
    IgnoreReports(String),
    Remove { id: String, note: Option<String> },
    Approve(String),
    RemovalMessage { id: String, notice: RemovalNotice },
}

pub struct FakePlatform {
    feed: Mutex<Vec<Submission>>,
    calls: Mutex<Vec<Call>>,
    clock: Mutex<DateTime<Utc>>,
    /// Top-level comments whose replies are withheld from `comment_tree`.
    lazy: HashSet<String>,
    refreshes: Mutex<usize>,
}

impl FakePlatform {
    pub fn new(feed: Vec<Submission>, now: DateTime<Utc>) -> Self {
        Self {
            feed: Mutex::new(feed),
            calls: Mutex::new(Vec::new()),
            clock: Mutex::new(now),
            lazy: HashSet::new(),
            refreshes: Mutex::new(0),
        }
    }

    pub fn with_lazy_replies(mut self, comment_id: &str) -> Self {
        self.lazy.insert(comment_id.to_owned());
        self
    }

    pub fn set_now(&self, now: DateTime<Utc>) {
        *self.clock.lock().unwrap() = now;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn refreshes(&self) -> usize {
        *self.refreshes.lock().unwrap()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn with_comment<T>(&self, id: &str, f: impl FnOnce(&mut Comment) -> T) -> Option<T> {
        let mut feed = self.feed.lock().unwrap();
        let result = feed
            .iter_mut()
            .find_map(|submission| find(&mut submission.comments, id))
            .map(f);
        result
    }
}

fn find<'a>(comments: &'a mut [Comment], id: &str) -> Option<&'a mut Comment> {
    for comment in comments.iter_mut() {
        if comment.id == id {
            return Some(comment);
        }
        if let Some(found) = find(&mut comment.replies, id) {
            return Some(found);
        }
    }
    None
}

#[async_trait]
impl Platform for FakePlatform {
    async fn me(&self) -> Result<String> {
        Ok(BOT.to_owned())
    }

    async fn hot(&self, _community: &str, limit: usize) -> Result<Vec<Submission>> {
        let feed = self.feed.lock().unwrap();
        Ok(feed
            .iter()
            .take(limit)
            .map(|s| s.clone().with_comments(Vec::new()))
            .collect())
    }

    async fn comment_tree(&self, submission: &Submission) -> Result<Vec<Comment>> {
        let feed = self.feed.lock().unwrap();
        let mut comments = feed
            .iter()
            .find(|s| s.id == submission.id)
            .map(|s| s.comments.clone())
            .unwrap_or_default();
        for comment in &mut comments {
            if self.lazy.contains(&comment.id) {
                comment.replies.clear();
            }
        }
        Ok(comments)
    }

    async fn refresh_replies(&self, comment: &Comment) -> Result<Vec<Comment>> {
        *self.refreshes.lock().unwrap() += 1;
        Ok(self
            .with_comment(&comment.id, |c| c.replies.clone())
            .unwrap_or_default())
    }

    async fn reply(&self, parent: &Comment, body: &str) -> Result<String> {
        self.record(Call::Reply {
            parent: parent.id.clone(),
            body: body.to_owned(),
        });
        let id = format!("bot-{}", parent.id);
        let reply = Comment {
            id: id.clone(),
            link_id: parent.link_id.clone(),
            author: Some(BOT.to_owned()),
            body: body.to_owned(),
            created: *self.clock.lock().unwrap(),
            ..Default::default()
        };
        self.with_comment(&parent.id, |c| c.replies.push(reply));
        Ok(id)
    }

    async fn distinguish(&self, comment_id: &str, sticky: bool) -> Result<()> {
        self.record(Call::Distinguish {
            id: comment_id.to_owned(),
            sticky,
        });
        self.with_comment(comment_id, |c| c.distinguished = Some(MODERATOR.to_owned()));
        Ok(())
    }

    async fn ignore_reports(&self, comment_id: &str) -> Result<()> {
        self.record(Call::IgnoreReports(comment_id.to_owned()));
        Ok(())
    }

    async fn remove(&self, comment_id: &str, mod_note: Option<&str>) -> Result<()> {
        self.record(Call::Remove {
            id: comment_id.to_owned(),
            note: mod_note.map(str::to_owned),
        });
        self.with_comment(comment_id, |c| c.removed = true);
        Ok(())
    }

    async fn approve(&self, comment_id: &str) -> Result<()> {
        self.record(Call::Approve(comment_id.to_owned()));
        self.with_comment(comment_id, |c| {
            c.approved = true;
            c.removed = false;
        });
        Ok(())
    }

    async fn send_removal_message(&self, comment_id: &str, notice: &RemovalNotice) -> Result<()> {
        self.record(Call::RemovalMessage {
            id: comment_id.to_owned(),
            notice: notice.clone(),
        });
        Ok(())
    }
}

pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 18, 0, 0).unwrap()
}

pub fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    now() - TimeDelta::minutes(minutes)
}

pub fn comment(id: &str, author: &str, age_minutes: i64, replies: Vec<Comment>) -> Comment {
    Comment {
        id: id.to_owned(),
        link_id: "t3_thread".to_owned(),
        author: Some(author.to_owned()),
        body: format!("{author} here, check out my latest release"),
        created: minutes_ago(age_minutes),
        replies,
        ..Default::default()
    }
}

/// The bot's distinguished warning reply, posted `age_minutes` ago.
pub fn warning(id: &str, age_minutes: i64) -> Comment {
    Comment {
        distinguished: Some(MODERATOR.to_owned()),
        body: "Please contribute to the thread".to_owned(),
        ..comment(id, BOT, age_minutes, Vec::new())
    }
}

pub fn thread(comments: Vec<Comment>) -> Submission {
    Submission {
        id: "thread".to_owned(),
        title: TITLE.to_owned(),
        stickied: true,
        distinguished: Some(MODERATOR.to_owned()),
        comments,
    }
}

pub fn settings(min_top_level_comments: usize) -> ScanSettings {
    ScanSettings {
        community: "synthesizers".to_owned(),
        title_marker: "Self-Promotion Roundup".to_owned(),
        hot_limit: 2,
        dry_run: false,
        thresholds: Thresholds {
            min_top_level_comments,
            ..Thresholds::default()
        },
        overrides: OverrideList::default(),
        warning_template: MessageTemplate::new(
            "Hi u/$author, please reply to someone else within $hours hours.",
        ),
        removal_template: MessageTemplate::new(
            "Your comment was removed: no participation within ${hours} hours.",
        ),
        removal_notice: NoticeKind::Private,
    }
}
