use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "roster", about = concat!("roster v", env!("CARGO_PKG_VERSION"), " - who leaves, who's coming, what's still open"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding the roster data (overrides the config file)
    #[arg(long = "data-dir", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Config file to read instead of the default location
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show per-group and rollup numbers
    Stats,
    /// Add an incoming commit to a group
    Commit(CommitArgs),
    /// Remove the most recent commit from a group
    Uncommit(GroupArg),
    /// Set how many players are departing a group
    Srtr(CountArgs),
    /// Set a group's target headcount
    Target(CountArgs),
    /// Set a super-group's target headcount
    SgTarget(CountArgs),
    /// Reset the roster to defaults
    Reset(ResetArgs),
}

#[derive(Args)]
pub struct CommitArgs {
    /// Group id (e.g. qb, wr)
    pub pos: String,
    /// Star rating, 1 to 5
    #[arg(value_parser = clap::value_parser!(u8).range(1..=5))]
    pub stars: u8,
    /// Mark as an athlete commit
    #[arg(long)]
    pub ath: bool,
}

#[derive(Args)]
pub struct GroupArg {
    /// Group id
    pub pos: String,
}

#[derive(Args)]
pub struct CountArgs {
    /// Group or super-group id
    pub id: String,
    /// New value; negatives are stored as 0
    #[arg(allow_negative_numbers = true)]
    pub value: i64,
}

#[derive(Args)]
pub struct ResetArgs {
    /// Only zero every group's departures
    #[arg(long = "srtr-only")]
    pub srtr_only: bool,
}
