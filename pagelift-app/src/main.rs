use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use pagelift_common::OutputFormat;
use pagelift_common::observability::{LogConfig, init_logging};
use pagelift_drivers::browser::driver::PageliftBrowser;
use pagelift_extract::format;
use tracing::info;

/// Extract structured content from a web page with a headless browser.
#[derive(Debug, Parser)]
#[command(name = "pagelift", version)]
struct Cli {
    /// Target URL.
    url: String,

    /// Output format for the extraction result.
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Page load timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_logging(LogConfig::default())?;
    info!(target: "app", log = %log_path.display(), url = %cli.url, "pagelift starting");

    let browser = PageliftBrowser::launch().await?;
    let result =
        pagelift_extract::extract(&browser, &cli.url, Duration::from_secs(cli.timeout)).await;
    browser.close().await;

    // Extraction failures are reported inside the payload; the process still
    // exits zero so callers inspect the result, not the exit code.
    println!("{}", format::render(&result, cli.format)?);
    Ok(())
}
