use browser::aggregator::ProbeAggregator;
use browser::directory::DirectoryClient;
use clap::Parser;
use log::{info, warn};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory service base URL
    #[arg(short = 'd', long, default_value = "http://127.0.0.1:8080")]
    directory: String,

    /// Per-probe timeout in milliseconds
    #[arg(short = 't', long, default_value = "1000")]
    timeout_ms: u64,

    /// Cap on simultaneously in-flight probes (unlimited when omitted)
    #[arg(short = 'c', long)]
    max_in_flight: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    info!("Fetching server list from {}", args.directory);

    let client = DirectoryClient::new(&args.directory)?;
    let records = client.fetch_servers().await?;
    info!("Directory returned {} servers", records.len());

    let mut aggregator =
        ProbeAggregator::new().with_timeout(Duration::from_millis(args.timeout_ms));
    if let Some(cap) = args.max_in_flight {
        aggregator = aggregator.with_max_in_flight(cap);
    }

    let total = records.len();
    let mut reachable = 0usize;
    let mut stream = aggregator.probe_all(records);

    while let Some((record, result)) = stream.recv().await {
        if result.is_success() {
            reachable += 1;
            info!("{} -> {}", record, result);
        } else {
            warn!("{} -> {}", record, result);
        }
    }

    info!("Probe round complete: {}/{} reachable", reachable, total);

    Ok(())
}
