use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use musicbox_rs::cli::Args;
use musicbox_rs::config::Config;
use musicbox_rs::controller::{AppController, Command, CommandError};
use musicbox_rs::logging;
use musicbox_rs::model::{HttpLibraryClient, PlayerStore};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.generate_config {
        print!("{}", Config::default().to_toml()?);
        return Ok(());
    }

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;
    if let Some(base_url) = args.base_url {
        config.server.base_url = base_url;
    }

    // Keep the guard so buffered log lines are flushed on exit
    let _log_guard = match logging::init_logging(&config.logging) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!(base_url = %config.server.base_url, "=== musicbox-rs starting ===");

    let client = HttpLibraryClient::new(&config.server.base_url, config.server.timeout())
        .context("building HTTP client")?;
    let store = PlayerStore::new(Arc::new(client));
    let controller = AppController::new(store);

    println!("Connected to {} - type `help` for commands", config.server.base_url);
    let startup = controller.load_library().await;
    if !startup.is_empty() {
        println!("{}", startup);
    }

    run_console(&controller).await?;

    tracing::info!("musicbox-rs shutting down");
    Ok(())
}

async fn run_console(controller: &AppController) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        let output = controller.handle_command(command).await;
        if !output.is_empty() {
            println!("{}", output);
        }

        if let Some(now_playing) = controller.acknowledge_track_change().await {
            println!("{}", now_playing);
        }
    }

    Ok(())
}
