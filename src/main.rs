mod error;
mod fetch;
mod parser;
mod pipeline;
mod settings;
mod wordlist;

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use tracing::info;

use settings::{Overrides, Settings};

#[derive(Parser)]
#[command(
    name = "wordlist_scraper",
    about = "Turn the cells of every HTML table on a page into a wordlist"
)]
struct Cli {
    /// Page URLs or saved .html files (default: WORDLIST_URL or the Game Boy games list)
    sources: Vec<String>,

    /// Output wordlist path [default: wordlist.txt]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// CSS selector for tables, e.g. "table.wikitable" [default: table]
    #[arg(short, long)]
    selector: Option<String>,

    /// Request timeout in seconds [default: 20]
    #[arg(long)]
    timeout: Option<u64>,

    /// User-Agent header sent with each request
    #[arg(long)]
    user_agent: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load(Overrides {
        sources: cli.sources,
        output: cli.output,
        selector: cli.selector,
        timeout_secs: cli.timeout,
        user_agent: cli.user_agent,
    })?;

    let summary = pipeline::run(&settings).await?;
    info!(
        "{} sources, {} tables, {} tokens",
        summary.sources, summary.tables, summary.tokens
    );
    println!(
        "Wrote {} tokens to {}",
        summary.tokens,
        summary.output.display()
    );

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        info!("Done in {}", format_duration(elapsed));
    }

    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
