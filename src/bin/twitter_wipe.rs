

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use twitter_wipe::{DEFAULT_CONFIG_PATH, RunOrchestrator, WipeConfig};


#[derive(Debug, Parser)]
#[command(name = "twitter-wipe", version, about = "Delete your tweets, retweets and likes")]
struct Args {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,twitter_wipe=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = WipeConfig::load(&args.config)?;

    info!("Starting..");
    let summary = RunOrchestrator::from_config(&config)?.run().await?;

    if summary.total_failed() > 0 {
        info!("{} delete calls failed and were skipped", summary.total_failed());
    }

    Ok(())
}
