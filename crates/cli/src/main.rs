//! Boostline CLI - Account management and seeding tools.
//!
//! # Usage
//!
//! ```bash
//! # Create an admin account (replaces any notion of a built-in admin login)
//! bl-cli admin create -e admin@example.com -p 94770000000 -n "Administrator"
//!
//! # Seed the store with demo data for local development
//! bl-cli seed
//! ```
//!
//! # Commands
//!
//! - `admin create` - Create admin accounts
//! - `seed` - Seed the store with demo data
//!
//! The store directory comes from `BOOSTLINE_DATA_DIR` (default ./data).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bl-cli")]
#[command(author, version, about = "Boostline CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
    /// Seed the store with demo data
    Seed,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin WhatsApp number (11 digits)
        #[arg(short, long)]
        phone: String,

        /// Admin display name
        #[arg(short, long, default_value = "Administrator")]
        name: String,

        /// Password; a random one is generated and printed when omitted
        #[arg(long)]
        password: Option<String>,
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
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                phone,
                name,
                password,
            } => {
                commands::admin::create(&email, &phone, &name, password).await?;
            }
        },
        Commands::Seed => commands::seed::run().await?,
    }
    Ok(())
}
