use clap::Parser;
use tracing_subscriber::EnvFilter;

use voxgate::cli::{Cli, Commands};
use voxgate::dirs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    dirs::ensure_dirs()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            voxgate::cli::serve::execute(&host, port).await?;
        }
        Commands::Check { text } => {
            voxgate::cli::check::execute(&text)?;
        }
        Commands::Eval { cases, url } => {
            voxgate::cli::eval::execute(&cases, &url).await?;
        }
    }

    Ok(())
}
