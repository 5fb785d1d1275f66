use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::eyre;
use commands::{config, decode, encode, link};
use share_list_config::{Config, LoggingConfig, PathManager};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "steamrecap")]
#[command(about = "Steam Recap - share your year's recommendations as a single link")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors and command results
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a recommendation list into a share token
    #[command(long_about = "Read a recommendation list as JSON (from a file, or stdin with '-') and print the compact URL-safe token. With --link, print a full share link built from the configured base URL.")]
    Encode {
        /// Path to the list JSON, or '-' for stdin
        #[arg(value_name = "FILE")]
        input: String,

        /// Print a full share link instead of the bare token
        #[arg(long, action = ArgAction::SetTrue)]
        link: bool,
    },
    /// Decode a share token or link back into a list
    #[command(long_about = "Decode a share token, or a full share link containing one, and display the list. Both the current compact format and the older verbose format are accepted.")]
    Decode {
        /// Token, or a share link containing `?data=<token>`
        #[arg(value_name = "TOKEN_OR_LINK")]
        input: String,

        /// Write the decoded list as JSON to this file
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Wrap an existing token into a share link
    Link {
        #[arg(value_name = "TOKEN")]
        token: String,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file);

    // A broken config file must not prevent logging from coming up
    let logging_config = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(|_| LoggingConfig::default());
    logging::init_logging(cli.verbose, cli.quiet, &logging_config)
        .map_err(|e| eyre!("{}", e))?;

    let config = config
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::Encode { input, link } => encode::run_encode(&input, link, &config, &output),
        Commands::Decode { input, out } => decode::run_decode(&input, out.as_deref(), &output),
        Commands::Link { token } => link::run_link(&token, &config, &output),
        Commands::Config { cmd } => {
            config::run_config(cmd.unwrap_or(ConfigCommands::Show), &config, &output)
        }
    };

    if let Err(e) = &result {
        output.error(e.to_string());
        std::process::exit(1);
    }

    Ok(())
}
