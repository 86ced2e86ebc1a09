use anyhow::{Context, Result};
use clap::Parser;
use navgenius::config::ViewerConfig;
use navgenius::geojson_export::deck_to_feature_collection;
use navgenius::render::BaseMap;
use navgenius::{DatasetStore, DepotLocation, RouteViewer, Selection, VehicleClass, View, ViewMode};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod server;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RON file with viewer settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding destdf.json, fulldf.json and srcdf.json
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the deck JSON for one view
    Render {
        #[command(subcommand)]
        target: Target,
    },
    /// Print one view as a GeoJSON FeatureCollection
    Geojson {
        #[command(subcommand)]
        target: Target,
    },
    /// Serve views over HTTP
    Serve {
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[derive(clap::Subcommand, Debug, Clone)]
enum Target {
    /// Destination clusters and depots
    Overview,
    /// Every route from every depot
    Network,
    /// Routes for one depot and vehicle class
    Route {
        #[arg(long, default_value = "Single vehicle")]
        mode: ViewMode,
        #[arg(long, default_value = "South Mumbai (Gateway)")]
        depot: DepotLocation,
        #[arg(long, default_value = "Small van")]
        vehicle: VehicleClass,
    },
}

fn resolve(viewer: &RouteViewer, target: &Target) -> Result<View> {
    let selection = match target {
        Target::Overview => return Ok(View::Overview(viewer.overview())),
        Target::Network => Selection {
            mode: ViewMode::FullNetwork,
            ..Selection::default()
        },
        Target::Route {
            mode,
            depot,
            vehicle,
        } => Selection {
            mode: *mode,
            depot: *depot,
            vehicle: *vehicle,
        },
    };

    Ok(viewer.select(&selection)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the rendered output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_ron_file(path)?,
        None => ViewerConfig::default(),
    }
    .with_env_overrides();

    if let Some(dir) = args.data_dir {
        config.data_dir = dir;
    }

    let store = DatasetStore::new(&config);

    match args.cmd {
        Command::Render { target } => {
            let viewer = RouteViewer::from_store(&store, &config)
                .context("Failed to load route datasets")?;
            let view = resolve(&viewer, &target)?;
            println!("{}", view.to_json()?);
        }
        Command::Geojson { target } => {
            let viewer = RouteViewer::from_store(&store, &config)
                .context("Failed to load route datasets")?;
            let view = resolve(&viewer, &target)?;
            let collection = deck_to_feature_collection(view.deck());
            println!("{}", serde_json::to_string_pretty(&collection)?);
        }
        Command::Serve { address, port } => {
            let state = server::AppState::new(store, BaseMap::from(&config));
            server::run(state, address, port)
                .await
                .context("HTTP server failed")?;
        }
    }

    Ok(())
}
