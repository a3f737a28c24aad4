use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swiss_pairings::api::{build_router, state::AppState};
use swiss_pairings::config::AppConfig;
use swiss_pairings::storage::open_store;
use swiss_pairings::{PlayerId, Tournament};

#[derive(Parser)]
#[command(name = "swiss-pairings")]
#[command(about = "Swiss-system tournament standings and pairings")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error or a directive list)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new player
    Register {
        /// Player name (need not be unique)
        name: String,
    },

    /// Record the result of a match
    Report {
        /// Id of the player who won
        winner: PlayerId,

        /// Id of the player who lost
        loser: PlayerId,
    },

    /// Show the current standings
    Standings,

    /// Compute pairings for the next round
    Pairings,

    /// Show the number of registered players
    Count,

    /// Delete all match results
    ResetMatches,

    /// Delete all players
    ResetPlayers,

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },
}

fn init_tracing(config: &AppConfig) -> Result<()> {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => config.log_filter()?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json_logs;
    config.validate()?;

    init_tracing(&config)?;
    tracing::info!("Starting swiss-pairings v{}", env!("CARGO_PKG_VERSION"));

    let store = open_store(&config.storage).with_context(|| {
        format!(
            "Failed to open store at {}",
            config.storage.data_dir.display()
        )
    })?;
    let tournament = Tournament::new(store, config.tournament.clone());

    match cli.command {
        Commands::Register { name } => {
            let id = tournament.register_player(&name)?;
            println!("Registered {} with id {}", name.trim(), id);
        }
        Commands::Report { winner, loser } => {
            tournament.report_match(winner, loser)?;
            println!("Recorded: {} beat {}", winner, loser);
        }
        Commands::Standings => {
            let standings = tournament.standings()?;
            println!("\n=== Standings ===");
            println!(
                "{:>4}  {:>5}  {:<24} {:>4} {:>6} {:>7}",
                "Rank", "Id", "Name", "Wins", "Losses", "Matches"
            );
            for (rank, row) in standings.iter().enumerate() {
                println!(
                    "{:>4}  {:>5}  {:<24} {:>4} {:>6} {:>7}",
                    rank + 1,
                    row.id,
                    row.name,
                    row.wins,
                    row.losses(),
                    row.matches
                );
            }
        }
        Commands::Pairings => {
            let pairings = tournament.pairings()?;
            println!("\n=== Next Round ===");
            for (table, pairing) in pairings.iter().enumerate() {
                println!(
                    "Table {:>3}: {} ({}) vs {} ({})",
                    table + 1,
                    pairing.player1_name,
                    pairing.player1_id,
                    pairing.player2_name,
                    pairing.player2_id
                );
            }
        }
        Commands::Count => {
            println!("{}", tournament.count_players()?);
        }
        Commands::ResetMatches => {
            tournament.reset_matches()?;
            println!("All matches deleted");
        }
        Commands::ResetPlayers => {
            tournament.reset_players()?;
            println!("All players deleted");
        }
        Commands::Serve { host, port } => {
            let mut server = config.server;
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }
            let addr = server.bind_addr();
            let app = build_router(AppState {
                tournament,
                cors_origin: server.cors_origin,
            });
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
