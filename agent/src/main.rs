use agent::registration::{RegistrationAgent, ServerInfo};
use clap::Parser;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory service base URL
    #[arg(short = 'd', long, default_value = "http://127.0.0.1:8080")]
    directory: String,

    /// Game port to advertise
    #[arg(short = 'p', long, default_value = "7777")]
    port: u16,

    /// Server display name
    #[arg(short = 'n', long, default_value = "Unnamed Server")]
    name: String,

    /// Server description
    #[arg(long, default_value = "")]
    description: String,

    /// Current map
    #[arg(short = 'm', long, default_value = "Lobby")]
    map: String,

    /// Player capacity
    #[arg(long, default_value = "64")]
    max_players: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let info = ServerInfo {
        port: args.port,
        name: args.name,
        description: args.description,
        current_map: args.map,
        player_count: 0,
        max_players: args.max_players,
        mods: vec![],
    };

    info!("Registering with directory at {}", args.directory);

    let mut agent = RegistrationAgent::new(&args.directory, info)?;

    tokio::select! {
        result = agent.run() => {
            if let Err(e) = result {
                warn!("Registration loop stopped: {}", e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    }

    Ok(())
}
