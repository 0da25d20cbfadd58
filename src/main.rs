use anyhow::Error;
use args::{Args, SubCommands};
use clap::{CommandFactory, Parser};
use tracing::error;

mod args;
mod clients;
mod commands;
mod errors;
mod models;
mod repos;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "aoai=info".to_string())
        )
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // Help and version land here too; clap picks the right stream.
            e.print()?;
            return Ok(());
        }
    };

    match args.subcmd {
        Some(SubCommands::ChatCompletion(cmd)) => {
            commands::chat_completion::run(&cmd).await;
        }
        Some(SubCommands::Config(cmd)) => {
            if let Err(e) = commands::config::run(&cmd) {
                error!("{:#}", e);
            }
        }
        None => {
            Args::command().print_help()?;
        }
    };
    Ok(())
}
