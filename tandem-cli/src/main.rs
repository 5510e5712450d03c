use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::net::{IpAddr, SocketAddr};
use tandem_core::IceServerConfig;
use tandem_server::{DEFAULT_PORT, DEFAULT_STUN_SERVERS, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tandem", version, about = "Two-party video call signaling server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Accept WebSocket clients and pair them into rooms.
    Serve(ServeArgs),
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    #[arg(long, default_value = "0.0.0.0", env = "TANDEM_HOST")]
    host: IpAddr,

    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "PORT")]
    port: u16,

    /// STUN/TURN urls advertised to clients (comma-separated)
    #[arg(
        long,
        value_delimiter = ',',
        default_values_t = DEFAULT_STUN_SERVERS.map(String::from),
        env = "TANDEM_STUN_SERVERS"
    )]
    stun_servers: Vec<String>,

    /// Pending room commands before socket handlers wait
    #[arg(long, default_value_t = 100, env = "TANDEM_COMMAND_BUFFER")]
    command_buffer: usize,
}

impl ServeArgs {
    fn into_config(self) -> Result<ServerConfig> {
        if self.command_buffer == 0 {
            anyhow::bail!("--command-buffer must be at least 1");
        }

        Ok(ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            ice_servers: self
                .stun_servers
                .into_iter()
                .map(|url| url.trim().to_owned())
                .filter(|url| !url.is_empty())
                .map(IceServerConfig::stun)
                .collect(),
            command_buffer: self.command_buffer,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // Without a signal handler the server simply runs until killed.
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => {
            init_tracing();
            let config = args.into_config().context("Invalid server configuration")?;

            println!("{}", "📡 Starting Tandem signaling server...".green().bold());
            println!("   🔌 WebSocket: ws://{}/ws", config.bind_addr);
            for server in &config.ice_servers {
                println!("   🧭 ICE:       {}", server.urls.join(", "));
            }

            tandem_server::run(config, shutdown_signal()).await?;

            println!("{}", "👋 Server stopped.".cyan());
        }
    }

    Ok(())
}
