//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use respira_core::config::Config;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "respira")]
#[command(version)]
#[command(about = "Guided breathing in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Start with cues audible (overrides sound_on_start from config)
    #[arg(long)]
    sound: bool,

    /// Run without opening an audio device
    #[arg(long = "no-audio")]
    no_audio: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // default to the breathing screen
    let Some(command) = cli.command else {
        let _log_guard = logging::init();

        let mut config = Config::load().context("load config")?;
        if cli.sound {
            config.sound_on_start = true;
        }
        if cli.no_audio {
            config.disable_audio = true;
        }

        return respira_tui::run(config);
    };

    match command {
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
