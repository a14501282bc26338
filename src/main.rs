use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "ecotrace")]
#[command(about = "EcoTrace - journey logging with carbon accounting and achievements")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.ecotrace/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log a journey and re-evaluate achievements
    Log {
        /// Distance traveled in kilometers
        #[arg(long)]
        distance: f64,

        /// Transport mode (walking, cycling, public-transit, driving, ...)
        #[arg(long)]
        mode: String,

        /// CO2e in kilograms; estimated from the mode's factor if omitted
        #[arg(long)]
        emissions: Option<f64>,
    },

    /// List recent journeys
    Journeys {
        /// Maximum number of journeys to show
        #[arg(long, default_value_t = 20)]
        limit: u32,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Show the achievement catalog and what is unlocked
    Achievements {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// List challenges, or join one
    Challenges {
        /// Join the challenge with this ID (e.g. ch_car_free_week)
        #[arg(long)]
        join: Option<String>,
    },

    /// Show totals, per-mode breakdown, and recent daily activity
    Summary {
        /// Days of daily activity to include
        #[arg(long, default_value_t = 7)]
        days: u32,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Initialize a new ~/.ecotrace/config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Delete logged journeys and/or gamification state
    Reset {
        /// Also delete awarded achievements and challenge enrollments
        #[arg(long)]
        gamification: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = ecotrace::Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Log {
            distance,
            mode,
            emissions,
        } => {
            cli::log::log_command(&config, distance, &mode, emissions)?;
        }
        Commands::Journeys { limit, json } => {
            cli::journeys::journeys_command(&config, limit, json)?;
        }
        Commands::Achievements { json } => {
            cli::achievements::achievements_command(&config, json)?;
        }
        Commands::Challenges { join } => {
            cli::challenges::challenges_command(&config, join.as_deref())?;
        }
        Commands::Summary { days, json } => {
            cli::summary::summary_command(&config, days, json)?;
        }
        Commands::Init { force } => {
            cli::init::init_command(cli.config.as_deref(), force)?;
        }
        Commands::Reset { gamification } => {
            cli::reset::reset_command(&config, gamification)?;
        }
    }

    Ok(())
}
