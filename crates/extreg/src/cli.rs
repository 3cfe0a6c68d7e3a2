//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use extreg_core::PlatformProfile;

/// extreg - aggregate and validate the azd extension registry
#[derive(Parser, Debug)]
#[command(name = "extreg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to extreg.yaml config file
    #[arg(short, long, global = true, env = "EXTREG_CONFIG")]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch, merge and filter source registries into one registry file
    Aggregate(AggregateArgs),

    /// Check an aggregated registry file; exits 1 on any failure
    Validate(ValidateArgs),

    /// Update the README version table from the registry
    Readme(ReadmeArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// Source registry URL (repeatable; replaces configured sources)
    #[arg(short, long = "source", value_name = "URL")]
    pub sources: Vec<String>,

    /// Output registry path
    #[arg(short, long)]
    pub output: Option<Utf8PathBuf>,

    /// Skip sources that fail to fetch instead of aborting
    #[arg(long)]
    pub best_effort: bool,

    /// Also drop versions whose artifact URLs are not live
    #[arg(long)]
    pub check_urls: bool,

    /// Required platform set (baseline or strict)
    #[arg(long)]
    pub profile: Option<PlatformProfile>,

    /// Maximum concurrent URL checks
    #[arg(long)]
    pub concurrency: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Registry file to validate (defaults to the configured output)
    #[arg(short, long)]
    pub registry: Option<Utf8PathBuf>,

    /// Required platform set for the latest version (baseline or strict)
    #[arg(long)]
    pub profile: Option<PlatformProfile>,

    /// Skip live URL reachability checks
    #[arg(long)]
    pub skip_urls: bool,

    /// Maximum concurrent URL checks
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args, Debug)]
pub struct ReadmeArgs {
    /// Registry file to read versions from
    #[arg(short, long)]
    pub registry: Option<Utf8PathBuf>,

    /// README file to update
    #[arg(long)]
    pub readme: Option<Utf8PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration
    Show(ConfigShowArgs),
}

#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
