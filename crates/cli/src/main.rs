//! Vitrine CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run builder database migrations
//! vitrine-cli migrate
//!
//! # Provision a demo tenant row
//! vitrine-cli seed --tenant-id 1
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Provision a settings row for a tenant

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vitrine-cli")]
#[command(author, version, about = "Vitrine CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run builder database migrations
    Migrate,
    /// Provision a settings row for a tenant
    Seed {
        /// Tenant to provision
        #[arg(short, long, default_value_t = 1)]
        tenant_id: i32,

        /// Store display name
        #[arg(short, long, default_value = "Demo Store")]
        store_name: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Seed {
            tenant_id,
            store_name,
        } => commands::seed::run(tenant_id, &store_name).await,
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
