//! Writers' Room CLI binary.
//!
//! - Write a screenplay from a theme
//! - Print the effective configuration

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, show_config, write_screenplay};

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    writers_room::init_logging(cli.verbose, cli.json_logs)?;

    match cli.command {
        Commands::Write(args) => {
            write_screenplay(args).await?;
        }
        Commands::Config { config } => {
            show_config(config.as_deref())?;
        }
    }

    Ok(())
}
