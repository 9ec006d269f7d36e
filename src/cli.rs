use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scenefetch")]
#[command(author, version, about = "Queue new remote releases for transfer with lftp")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the generated lftp scripts instead of running them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Validate the config file and exit
    #[arg(short, long)]
    pub test: bool,

    /// Only print scripts in dry-run mode, not the per-directory decisions
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
