use clap::Parser;
use mw_lookup::MethodOrder;
use std::path::PathBuf;

/// Define CLI arguments
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Get a definition from the Merriam-Webster dictionary",
    long_about = "Looks up a word in the Merriam-Webster Collegiate dictionary API.\n\
                  \n\
                  Definitions, pronunciations and illustrations are cached in the cache\n\
                  directory while the lookup runs and deleted afterwards unless -c is given.\n\
                  Settings are read from a JSON file (~/.mwrc by default) with the keys\n\
                  \"key\" (required), \"player\", \"viewer\" and \"cache_dir\"."
)]
pub struct CliArgs {
    /// Word to look up
    #[arg(short, long)]
    pub word: String,

    /// Play the pronunciation, if available
    #[arg(short, long)]
    pub sound: bool,

    /// Display the illustration, if available
    #[arg(short, long)]
    pub picture: bool,

    /// Keep fetched artifacts in the cache directory
    #[arg(short, long)]
    pub cache: bool,

    /// Check the cache directory before the network
    #[arg(short = 'x', long)]
    pub local_first: bool,

    /// Explicit resolution order, e.g. "disk,net" or "net"
    #[arg(short, long, conflicts_with = "local_first")]
    pub methods: Option<MethodOrder>,

    /// Use the specified config file instead of ~/.mwrc
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Override the cache directory
    #[arg(short = 'd', long)]
    pub cache_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable detailed debug logging")]
    pub verbose: bool,
}
