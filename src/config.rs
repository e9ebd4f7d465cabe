use std::path::PathBuf;

use chrono::TimeDelta;
use clap::{Parser, builder::BoolishValueParser};

use crate::{
    error::{Error, Result},
    platform::{Credentials, NoticeKind},
    processing::{ScanSettings, classifier::OverrideList, escalation::Thresholds},
    utils::file::{load_overrides, load_template},
};

pub const DEFAULT_SUBREDDIT_NAME: &str = "synthesizers";
pub const THREAD_TITLE: &str = "Self-Promotion Roundup";

/// Warns and removes self-promotion comments from authors who never took part
/// in the rest of the thread.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Opt {
    /// Community whose self-promotion thread is moderated
    #[arg(long, env = "subreddit_name", default_value = DEFAULT_SUBREDDIT_NAME)]
    pub subreddit_name: String,

    /// Log decisions without touching anything on the platform
    #[arg(long, env = "dry_run", value_parser = BoolishValueParser::new())]
    pub dry_run: bool,

    /// Title prefix identifying the thread
    #[arg(long, default_value = THREAD_TITLE)]
    pub title_marker: String,

    /// Number of hot submissions searched for the pinned thread
    #[arg(long, default_value_t = 2)]
    pub hot_limit: usize,

    #[arg(long, default_value_t = 5)]
    pub warn_after_minutes: i64,

    #[arg(long, default_value_t = 120)]
    pub remove_after_minutes: i64,

    /// Top-level comments needed before enforcement starts
    #[arg(long, default_value_t = 5)]
    pub min_top_level_comments: usize,

    #[arg(long, default_value = "self-promo-warning.txt")]
    pub warning_template: PathBuf,

    #[arg(long, default_value = "self-promo-removal.txt")]
    pub removal_template: PathBuf,

    /// JSON array of usernames exempt from enforcement
    #[arg(long, env = "overrides")]
    pub overrides: Option<PathBuf>,

    /// How the author is told about a removal
    #[arg(long, value_enum, default_value_t = NoticeKind::Private)]
    pub removal_notice: NoticeKind,

    /// Print the scan report as JSON instead of the summary
    #[arg(long)]
    pub json: bool,

    #[arg(long, env = "REDDIT_CLIENT_ID")]
    pub client_id: String,

    #[arg(long, env = "REDDIT_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: String,

    #[arg(long, env = "REDDIT_USERNAME")]
    pub username: String,

    #[arg(long, env = "REDDIT_PASSWORD", hide_env_values = true)]
    pub password: String,

    #[arg(
        long,
        env = "REDDIT_USER_AGENT",
        default_value = concat!("self-promo-bot/", env!("CARGO_PKG_VERSION"))
    )]
    pub user_agent: String,
}

impl Opt {
    pub fn thresholds(&self) -> Result<Thresholds> {
        if self.warn_after_minutes < 0 || self.remove_after_minutes < 0 {
            return Err(Error::config("thresholds must not be negative"));
        }
        if self.remove_after_minutes < self.warn_after_minutes {
            return Err(Error::config(format!(
                "removal threshold ({} min) is shorter than the warning threshold ({} min)",
                self.remove_after_minutes, self.warn_after_minutes
            )));
        }
        Ok(Thresholds {
            warn_after: TimeDelta::minutes(self.warn_after_minutes),
            remove_after: TimeDelta::minutes(self.remove_after_minutes),
            min_top_level_comments: self.min_top_level_comments,
        })
    }

    /// Loads templates and the override list from disk.
    pub fn scan_settings(&self) -> Result<ScanSettings> {
        let overrides = match &self.overrides {
            Some(path) => load_overrides(path)?,
            None => OverrideList::default(),
        };

        Ok(ScanSettings {
            community: self.subreddit_name.clone(),
            title_marker: self.title_marker.clone(),
            hot_limit: self.hot_limit,
            dry_run: self.dry_run,
            thresholds: self.thresholds()?,
            overrides,
            warning_template: load_template(&self.warning_template)?,
            removal_template: load_template(&self.removal_template)?,
            removal_notice: self.removal_notice,
        })
    }

    pub fn credentials(&self) -> Credentials {
        Credentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}
