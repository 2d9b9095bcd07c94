mod cli;

use anyhow::Context;
use clap::Parser;
use cli::CliArgs;
use mw_lookup::config::default_config_path;
use mw_lookup::{Config, ConfigFile, ConfigOverrides, LookupError, PresentOptions, WordLookup};
use std::process::ExitCode;
use tracing::{debug, error, Level};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(LookupError::MissingApiKey) = e.downcast_ref::<LookupError>() {
                eprintln!("Merriam-Webster API key is missing, exiting.");
            } else {
                error!("{:#}", e);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    debug!("Reading config from {}", config_path.display());

    let file = ConfigFile::load(&config_path).await?;
    let overrides = ConfigOverrides {
        retain: args.cache,
        disk_first: args.local_first,
        methods: args.methods,
        cache_dir: args.cache_dir,
    };
    let config = Config::resolve(file, overrides)?;

    let options = PresentOptions {
        sound: args.sound,
        pictures: args.picture,
    };

    let lookup = WordLookup::with_defaults(config).context("Failed to set up HTTP client")?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    lookup
        .run(&args.word, options, &mut out)
        .await
        .with_context(|| format!("Could not look up '{}'", args.word))?;

    Ok(())
}
