//! Wayfarer MCP Server — entry point.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use wayfarer_mcp::config::load_config;
use wayfarer_mcp::protocol::ProtocolHandler;
use wayfarer_mcp::storage::MemoryStorage;
use wayfarer_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "wayfarer-mcp",
    about = "MCP server for Wayfarer — travel catalog, recommendations, and trip planning",
    version
)]
struct Cli {
    /// Configuration file path.
    #[arg(short, long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve {
        /// Configuration file path.
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Load and validate a configuration file.
    CheckConfig {
        /// Configuration file path.
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Print server capabilities as JSON.
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr; stdout belongs to the protocol.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Serve { config: None }) {
        Commands::Serve { config } => {
            let effective_config = config.or(cli.config);
            let config = load_config(effective_config.as_deref())?;
            let storage = match &config.data_file {
                Some(path) => {
                    let raw = std::fs::read_to_string(path)?;
                    let pairs: std::collections::BTreeMap<String, String> =
                        serde_json::from_str(&raw)?;
                    MemoryStorage::seeded(pairs).await
                }
                None => MemoryStorage::new(),
            };
            let handler = ProtocolHandler::new(config, Arc::new(storage))
                .map_err(|e| anyhow::anyhow!("server construction failed: {e}"))?;
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::CheckConfig { config } => {
            let effective_config = config.or(cli.config);
            let config = load_config(effective_config.as_deref())?;
            println!("{}", toml::to_string_pretty(&config)?);
        }

        Commands::Info => {
            let capabilities = wayfarer_mcp::types::ServerCapabilities::from_registries(
                true, true, true,
            );
            let tools = wayfarer_mcp::tools::default_tools();
            let info = serde_json::json!({
                "server": wayfarer_mcp::types::Implementation::server(),
                "protocol_version": wayfarer_mcp::types::MCP_VERSION,
                "capabilities": capabilities,
                "tools": tools.iter().map(|t| t.definition().name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }

    Ok(())
}
