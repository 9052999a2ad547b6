//! CLI entry point for the Mentora bulk pipeline: seed and export.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use mentora_graph::{GraphClient, GraphConfig};

use mentora_tools::{export, fixtures, seed};

#[derive(Parser)]
#[command(name = "mentora-tools")]
#[command(about = "Seed and export utilities for the Mentora content graph")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file prefix (default: mentora).
    #[arg(short, long, default_value = "mentora")]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Destructively reset the store and load fixture data.
    Seed {
        /// Path to the fixture JSON document.
        #[arg(short, long, default_value = "fixtures.json")]
        fixtures: PathBuf,
    },
    /// Write every stored entity to one JSON document.
    Export {
        /// Output path for the export document.
        #[arg(short, long, default_value = "import.json")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();

    let graph_config = load_graph_config(&cli.config)?;
    let graph = GraphClient::connect(&graph_config).await?;

    match cli.command {
        Command::Seed { fixtures } => {
            let data = fixtures::load(&fixtures)?;
            seed::run_seed(&graph, &data).await?;
        }
        Command::Export { out } => {
            export::run_export(&graph, &out).await?;
        }
    }

    Ok(())
}

/// Load graph connection settings from `<prefix>.toml` and `MENTORA__`
/// environment variables, falling back to the plain `NEO4J_*` variables the
/// API server uses. Credentials are required: seeding against a
/// half-configured store should fail before touching it.
fn load_graph_config(file_prefix: &str) -> anyhow::Result<GraphConfig> {
    let cfg = config::Config::builder()
        .add_source(config::File::with_name(file_prefix).required(false))
        .add_source(
            config::Environment::with_prefix("MENTORA")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let uri = cfg
        .get_string("neo4j.uri")
        .ok()
        .or_else(|| std::env::var("NEO4J_URI").ok())
        .unwrap_or_else(|| "bolt://localhost:7687".to_string());

    let user = cfg
        .get_string("neo4j.user")
        .ok()
        .or_else(|| std::env::var("NEO4J_USERNAME").ok())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Neo4j credentials are not configured: set neo4j.user in {file_prefix}.toml, \
                 MENTORA__NEO4J__USER, or NEO4J_USERNAME"
            )
        })?;

    let password = cfg
        .get_string("neo4j.password")
        .ok()
        .or_else(|| std::env::var("NEO4J_PASSWORD").ok())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Neo4j credentials are not configured: set neo4j.password in {file_prefix}.toml, \
                 MENTORA__NEO4J__PASSWORD, or NEO4J_PASSWORD"
            )
        })?;

    Ok(GraphConfig {
        uri,
        user,
        password,
        ..GraphConfig::default()
    })
}
