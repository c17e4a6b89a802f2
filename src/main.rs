use clap::Parser;
use fleetdeck::core::config;
use fleetdeck::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "fleetdeck", about = "Terminal vehicle-fleet monitoring dashboard")]
struct Args {
    /// Base URL both vehicle feeds are served from
    #[arg(long)]
    base_url: Option<String>,

    /// Table rows per page
    #[arg(long)]
    items_per_page: Option<usize>,

    /// Artificial delay before publishing fetched data, in ms (dev only)
    #[arg(long)]
    simulate_latency_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to fleetdeck.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("fleetdeck.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        Default::default()
    });
    let resolved = config::resolve(
        &file_config,
        args.base_url.as_deref(),
        args.items_per_page,
        args.simulate_latency_ms,
    );

    log::info!("Fleetdeck starting up against {}", resolved.base_url);

    tui::run(resolved)
}
