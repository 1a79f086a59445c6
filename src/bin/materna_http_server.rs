use clap::Parser;
use log::info;
use materna::{load_node_config, MaternaHttpServer, MaternaNode};

/// Command line options for the HTTP server binary.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Port for the HTTP server; overrides the configured bind address
    #[arg(long)]
    port: Option<u16>,

    /// Path to the node configuration file
    #[arg(long)]
    config: Option<String>,
}

/// Main entry point for the materna HTTP server.
///
/// Loads configuration (`--config`, the `MATERNA_CONFIG` environment
/// variable, or `config/materna_config.json`), opens the store and serves
/// the REST API.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    materna::logging::init().ok();
    info!("Starting materna HTTP server...");

    let cli = Cli::parse();

    let config = load_node_config(cli.config.as_deref(), cli.port)?;
    info!("Config loaded successfully");

    let bind_address = config.bind_address.clone();
    let node = MaternaNode::load(config)?;
    info!("Node loaded successfully");

    let server = MaternaHttpServer::new(node, &bind_address);
    server.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["test"]);
        assert!(cli.port.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn custom_port() {
        let cli = Cli::parse_from(["test", "--port", "8080"]);
        assert_eq!(cli.port, Some(8080));
    }
}
