// src/main.rs

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use youyoung::cli::{run_persona, run_server, Cli, Commands};
use youyoung::config::CONFIG;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = CONFIG.log_level.parse::<Level>().unwrap_or(Level::INFO);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        None | Some(Commands::Serve) => {
            run_server(&CONFIG).await?;
        }
        Some(Commands::Persona {
            answers,
            seed,
            message,
        }) => {
            run_persona(&answers, seed.or(CONFIG.seed), message.as_deref())?;
        }
    }

    Ok(())
}
