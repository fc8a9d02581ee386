//! Command-line publisher for dashboard trigger events.
//!
//! Thin wrapper over [`TriggerClient`] so cron jobs and operators can push
//! notifications, refresh signals, and data updates at connected
//! dashboards. The endpoint comes from the same environment variables as
//! the link itself.

use anyhow::{Context, bail};
use tracing_subscriber::EnvFilter;

use inventory_link::config::LinkConfig;
use inventory_link::trigger::TriggerClient;
use inventory_link::ws::Category;

const USAGE: &str = "usage:
  trigger notification <message> [--channel <name>] [--category <info|success|warning|error>]
  trigger refresh [--channel <name>] [--force]
  trigger data-update <target> <json> [--channel <name>]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = LinkConfig::from_env();
    let client = TriggerClient::from_config(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        bail!("{USAGE}");
    };

    match command.as_str() {
        "notification" => {
            let Some((message, flags)) = rest.split_first() else {
                bail!("notification requires a message\n{USAGE}");
            };
            let channel = flag_value(flags, "--channel").unwrap_or("all");
            let category = parse_category(flag_value(flags, "--category").unwrap_or("info"))?;
            client.send_notification(message, channel, category).await?;
        }
        "refresh" => {
            let channel = flag_value(rest, "--channel").unwrap_or("all");
            let force = rest.iter().any(|arg| arg == "--force");
            client.trigger_refresh(channel, force).await?;
        }
        "data-update" => {
            let [target, json, flags @ ..] = rest else {
                bail!("data-update requires a target and a JSON payload\n{USAGE}");
            };
            let data = serde_json::from_str(json).context("payload is not valid JSON")?;
            let channel = flag_value(flags, "--channel").unwrap_or("all");
            client.send_data_update(data, target.as_str(), channel).await?;
        }
        other => bail!("unknown command `{other}`\n{USAGE}"),
    }

    tracing::info!("trigger published");
    Ok(())
}

fn parse_category(name: &str) -> anyhow::Result<Category> {
    match name {
        "info" => Ok(Category::Info),
        "success" => Ok(Category::Success),
        "warning" => Ok(Category::Warning),
        "error" => Ok(Category::Error),
        other => bail!("unknown category `{other}`"),
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}
