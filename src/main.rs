// ABOUTME: Command-line entry point that parses SSH client config files and prints their Host blocks
// ABOUTME: Resolves default file locations from the tool configuration when no paths are given

use anyhow::{Context, Result};
use clap::Parser;
use sshconfig::config::{Config, OutputFormat};
use sshconfig::{load_hosts, output};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sshconfig", about = "List the Host blocks of OpenSSH client config files")]
struct Args {
    /// SSH config files to parse, in order. Defaults to the fragment
    /// directory followed by the canonical config file.
    paths: Vec<PathBuf>,

    /// Tool configuration file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format, overriding the configured one
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Log debug output to stderr
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Write the default tool configuration and exit
    #[arg(long, default_value_t = false)]
    init_config: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config_path = match args.config {
        Some(path) => path,
        None => Config::default_config_path()?,
    };

    if args.init_config {
        Config::save_default_config(&config_path)?;
        println!("Wrote default configuration to {}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_or_default(&config_path)?;
    config.expand_path()?;
    config.validate().context("Invalid configuration")?;

    let paths = if args.paths.is_empty() {
        config.ssh_files()
    } else {
        args.paths
    };
    debug!("reading SSH config files: {:?}", paths);

    let records = load_hosts(&paths)?;
    info!("loaded {} host records from {} files", records.len(), paths.len());

    let format = args.format.unwrap_or(config.output.format);
    print!("{}", output::render(&records, format)?);

    Ok(())
}
