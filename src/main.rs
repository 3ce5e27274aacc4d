mod cli;
mod output;

use clap::Parser;
use syncmark::config::Config;
use syncmark::error::Result;

fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Initialize logger
    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);

    // Load configuration
    let cfg = match &args.config {
        Some(path) if path.exists() => Config::load_from_path(path)?,
        Some(_) => Config::default(),
        None => Config::load(),
    };

    cli::handle_args(args, &cfg, &config_path)?;

    Ok(())
}
