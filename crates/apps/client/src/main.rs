mod app;
mod config;
mod console;
mod error;
mod service;
mod session;

use std::sync::Arc;

use clap::Parser;
use layers::VectorLayer;
use scene::MapState;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::{Args, ClientConfig};
use service::{HttpProcessService, ProcessService};
use session::Session;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_args(Args::parse())?;
    let service: Arc<dyn ProcessService> = Arc::new(HttpProcessService::new(&config)?);
    info!(url = %config.service_url, mode = ?config.mode, "client ready");

    let mut session = Session::new(MapState::new(config.mode), config.ordering);
    let mut stdout = std::io::stdout();
    println!("{}", console::HELP);

    app::run(
        &mut session,
        &VectorLayer::default(),
        service,
        BufReader::new(tokio::io::stdin()),
        &mut stdout,
    )
    .await?;
    Ok(())
}
