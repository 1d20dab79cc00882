use anyhow::{bail, Context, Result};
use clap::Parser;
use reqwest::Client;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use trackhook::{config::DEFAULT_SHEET_CSV_URL, Webhook, WebhookRequest};
use url::Url;

#[derive(Parser)]
#[command(name = "lookup")]
#[command(about = "Run one tracking lookup and print the aggregator response")]
struct Args {
    /// Tracking number to look up
    tracking_number: String,

    /// Sheet CSV export URL (defaults to SHEET_CSV_URL, then the built-in sheet)
    #[arg(long, conflicts_with = "file")]
    sheet_url: Option<Url>,

    /// Read the sheet from a local CSV file instead
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn sheet_url(args: &Args) -> Result<Url> {
    if let Some(path) = &args.file {
        let path = path
            .canonicalize()
            .with_context(|| format!("resolving {}", path.display()))?;
        return Url::from_file_path(&path)
            .map_err(|_| anyhow::anyhow!("cannot build file URL for {}", path.display()));
    }
    if let Some(url) = &args.sheet_url {
        return Ok(url.clone());
    }
    let raw = std::env::var("SHEET_CSV_URL").unwrap_or_else(|_| DEFAULT_SHEET_CSV_URL.to_string());
    Url::parse(&raw).with_context(|| format!("parsing sheet URL {}", raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let url = sheet_url(&args)?;
    info!(%url, tracking_number = %args.tracking_number, "running lookup");

    let webhook = Webhook::new(Client::new(), url);
    let body = serde_json::json!({ "tracking_number": args.tracking_number }).to_string();
    let response = webhook
        .handle(WebhookRequest {
            http_method: "POST".to_string(),
            body: Some(body),
        })
        .await;

    println!("{}", serde_json::to_string_pretty(&response.body)?);

    if response.status_code != 200 {
        bail!("lookup returned status {}", response.status_code);
    }
    Ok(())
}
