//! Attache CLI binary entry point.

use attache::cli::{commands, Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("attache=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Login => commands::handle_login().await,
        Commands::Status => commands::handle_status().await,
        Commands::Logout => commands::handle_logout().await,
        Commands::Assistants(args) => commands::handle_assistants(&args.email).await,
        Commands::Grant(args) => commands::handle_grant(&args.target, &args.assistants).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
