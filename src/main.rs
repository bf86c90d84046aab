use clap::{Parser, Subcommand};
use shipment_risk::config::Config;
use shipment_risk::ml::{ArtifactStore, PredictionService};
use shipment_risk::state::{LogisticsStore, Snapshot};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Delay-risk scoring engine for logistics shipments
#[derive(Parser)]
#[command(name = "shipment-risk", version)]
struct Cli {
    /// Path to a JSON dataset snapshot (ports, shipments, weather,
    /// congestion)
    #[arg(long, env = "SHIPRISK_DATA")]
    data: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit the scaler and classifier on historical shipments and persist
    /// both artifacts
    Train,

    /// Score all open shipments and print the prediction batch as JSON
    Predict,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shipment_risk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("Using default configuration");
        Config::default()
    });

    tracing::info!("Starting shipment-risk v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(Snapshot::from_file(&cli.data)?.into_store().await?);
    let artifacts = ArtifactStore::new(config.artifacts.dir.clone());
    let service = PredictionService::new(store.clone(), artifacts, config.model.clone());

    match cli.command {
        Command::Train => {
            let report = service.train().await?;
            println!(
                "Model trained on {} shipments ({} delayed); artifacts saved to {}",
                report.n_samples,
                report.n_delayed,
                config.artifacts.dir.display()
            );
        }
        Command::Predict => {
            let run_id = service.generate_predictions().await?;
            let predictions = store.list_predictions_by_run(&run_id).await?;
            println!("{}", serde_json::to_string_pretty(&predictions)?);
            eprintln!(
                "Generated {} predictions (run_id: {})",
                predictions.len(),
                run_id
            );
        }
    }

    Ok(())
}
