use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "beacon")]
#[command(about = "Beacon - log good deeds, earn XP, unlock badges and complete challenges")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.beacon/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding stored progress (overrides settings.data_dir)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new profile (replaces any existing one)
    Init {
        /// Display name
        username: String,

        /// Avatar emoji (defaults to the first available avatar)
        #[arg(short, long)]
        avatar: Option<String>,
    },

    /// Log a good deed
    Log {
        /// Deed category (see `beacon categories`)
        category: String,

        /// What you did
        description: String,

        /// Optional reflection on how it went
        #[arg(short, long)]
        reflection: Option<String>,

        /// Optional image reference
        #[arg(short, long)]
        image: Option<String>,
    },

    /// Claim a completed challenge
    Claim {
        /// Challenge id (see `beacon challenges`)
        challenge: String,
    },

    /// Show level, rank, streak and points
    Status,

    /// Show active challenges and their progress
    Challenges,

    /// Show earned and locked badges
    Badges,

    /// Show recent activity
    History {
        /// Show every stored activity
        #[arg(long)]
        all: bool,
    },

    /// List deed categories
    Categories,

    /// Delete the stored profile
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let config = cli::load_config(cli.config.as_deref(), cli.data_dir)?;

    match cli.command {
        Some(Commands::Init { username, avatar }) => {
            cli::profile::init_command(&config, &username, avatar.as_deref())?;
        }
        Some(Commands::Log {
            category,
            description,
            reflection,
            image,
        }) => {
            cli::deed::log_command(&config, &category, &description, reflection, image)?;
        }
        Some(Commands::Claim { challenge }) => {
            cli::challenge::claim_command(&config, &challenge)?;
        }
        Some(Commands::Status) | None => {
            cli::profile::status_command(&config)?;
        }
        Some(Commands::Challenges) => {
            cli::challenge::challenges_command(&config)?;
        }
        Some(Commands::Badges) => {
            cli::badge::badges_command(&config)?;
        }
        Some(Commands::History { all }) => {
            cli::deed::history_command(&config, all)?;
        }
        Some(Commands::Categories) => {
            cli::deed::categories_command();
        }
        Some(Commands::Reset { yes }) => {
            cli::profile::reset_command(&config, yes)?;
        }
    }

    Ok(())
}
