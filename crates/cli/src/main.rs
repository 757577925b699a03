//! Driftline CLI - snapshot seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Write the demo snapshots into a data directory
//! driftline seed -d ./data
//!
//! # Create an admin user in a file-mode store
//! driftline admin create -d ./data -e admin@example.com -p s3cret-pass -n "Admin Name"
//! ```
//!
//! # Commands
//!
//! - `seed` - Seed a snapshot directory with demo data
//! - `admin create` - Create admin users

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "driftline")]
#[command(author, version, about = "Driftline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a snapshot directory with demo data
    Seed {
        /// Snapshot directory to write into
        #[arg(short, long, default_value = "./data")]
        data_dir: String,
    },
    /// Manage admin users
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin user
    Create {
        /// Snapshot directory holding the store
        #[arg(short, long, default_value = "./data")]
        data_dir: String,

        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin password
        #[arg(short, long)]
        password: String,

        /// Admin display name
        #[arg(short, long, default_value = "")]
        name: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { data_dir } => commands::seed::run(&data_dir).await?,
        Commands::Admin { action } => match action {
            AdminAction::Create {
                data_dir,
                email,
                password,
                name,
            } => {
                commands::admin::create_user(&data_dir, &email, &password, &name).await?;
            }
        },
    }
    Ok(())
}
