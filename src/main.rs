// GitHub user audit CLI
//
// Runs one audit, writes the JSON report and, when asked, a narrative
// assessment next to it.

mod cli;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use tokio_util::sync::CancellationToken;

use github_audit::{
    AppConfig, Auditor, GitHubClient, OpenAiSummarizer, Summarizer, write_audit_json,
    write_debug_json, write_narrative,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let mut config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;
    args.apply_overrides(&mut config);
    config.validate().context("validating command line overrides")?;

    if !config.github.has_token() {
        warn!("No GitHub token configured; anonymous requests are heavily rate limited");
    }
    info!("Audit parameters: {:?}", config.github.redacted());

    let client = GitHubClient::builder()
        .personal_token(config.github.token.clone())
        .build()
        .context("building GitHub client")?;

    let cancel = CancellationToken::new();
    spawn_cancel_triggers(cancel.clone(), args.timeout_secs);

    let auditor = Auditor::new(client, config.github.clone());
    let result = auditor
        .perform_full_audit(&args.username, &cancel)
        .await
        .with_context(|| format!("auditing {}", args.username))?;

    let now = chrono::Utc::now();
    let json_path = write_audit_json(&args.output_dir, &result, now)?;
    println!("{}", json_path.display());

    if config.github.save_debug_json {
        if let Err(err) = write_debug_json(&args.output_dir, &result, now) {
            warn!("Failed to save debug JSON: {err}");
        }
    }

    if args.summarize {
        let summarizer =
            OpenAiSummarizer::new(config.openai.clone()).context("building narrative client")?;
        match summarizer.summarize(&result).await {
            Ok(markdown) => {
                let path = write_narrative(&args.output_dir, &args.username, &markdown, now)?;
                println!("{}", path.display());
            }
            Err(err) => warn!("Narrative skipped, raw audit data is still available: {err}"),
        }
    }

    Ok(())
}

/// Cancel on Ctrl-C, or once `timeout_secs` elapse.
fn spawn_cancel_triggers(cancel: CancellationToken, timeout_secs: Option<u64>) {
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; cancelling audit");
            on_signal.cancel();
        }
    });

    if let Some(secs) = timeout_secs {
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(secs)).await;
            warn!("Timed out after {secs}s; cancelling audit");
            cancel.cancel();
        });
    }
}
