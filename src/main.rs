use anyhow::{Context as _, Result};
use chrono::Utc;
use clap::Parser;
use tokio::signal::ctrl_c;
use tracing::{info, warn};

use self_promo_bot::{config::Opt, display::print_summary, platform::RedditClient, scan};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let opt = Opt::parse();
    let settings = opt.scan_settings().context("loading bot configuration")?;
    info!(
        community = %settings.community,
        dry_run = settings.dry_run,
        overrides = settings.overrides.len(),
        "starting self-promotion scan"
    );

    let client = RedditClient::connect(&opt.credentials())
        .await
        .context("logging in to reddit")?;

    let report = tokio::select! {
        report = scan(&client, &settings, Utc::now()) => report.context("scanning self-promotion thread")?,
        _ = ctrl_c() => {
            warn!("interrupted, scan aborted without cleanup");
            return Ok(());
        }
    };

    if opt.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    Ok(())
}
