use anyhow::Context;
use calfeed::{Aggregator, EventAlert, HttpFetcher, TimeWindow, config::Settings};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Print upcoming events from the configured iCalendar feeds.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Start of the window (RFC 3339 or YYYY-MM-DD), defaults to now
    #[arg(long)]
    from: Option<String>,

    /// End of the window (RFC 3339 or YYYY-MM-DD), defaults to 31 days from now
    #[arg(long)]
    to: Option<String>,

    /// Print the alert for the next event starting within 30 minutes instead
    #[arg(long, conflicts_with_all = ["from", "to"])]
    alert: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().context("loading configuration")?;

    let filter =
        EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();

    let mut fetcher = HttpFetcher::builder().timeout(settings.http_timeout());
    if let Some(agent) = &settings.http_user_agent {
        fetcher = fetcher.user_agent(agent);
    }
    let aggregator = Aggregator::new(settings.feed_urls(), fetcher.build()?)
        .with_timezone(settings.timezone()?);

    let now = Utc::now();
    if cli.alert {
        let response = aggregator.aggregate(&TimeWindow::alert(now)).await;
        if let Some(alert) = EventAlert::upcoming(&response, now) {
            println!("{}: {}", alert.title, alert.message);
        }
        return Ok(());
    }

    let window = TimeWindow::from_params(cli.from.as_deref(), cli.to.as_deref(), now);
    tracing::debug!(from = %window.from, to = %window.to, "aggregating calendar feeds");
    let response = aggregator.aggregate(&window).await;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
