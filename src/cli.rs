use std::path::PathBuf;

use clap::Parser;

/// musicbox-rs - console client for a web audio library
#[derive(Parser, Debug)]
#[command(name = "musicbox-rs", version, about)]
pub struct Args {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Library server base URL, overrides the config file
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print the default config.toml to stdout and exit
    #[arg(long)]
    pub generate_config: bool,
}
