use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "blockledger")]
#[command(about = "Ledger of addresses observed in daily blocklist exports", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ingest the newest export archive into the ledger
    Ingest,
    /// Extract the highlighted addresses of the newest ledger section
    Extract(ExtractArgs),
    /// Delete old archives beyond the retention count
    Prune(PruneArgs),
    /// Print one ledger section as a table
    Show(ShowArgs),
}

#[derive(clap::Args, Debug)]
pub struct ExtractArgs {
    /// Only addresses whose organization contains this substring
    #[arg(long)]
    pub org: Option<String>,

    /// Hand the extracted addresses to the submission sink
    #[arg(long)]
    pub submit: bool,
}

#[derive(clap::Args, Debug)]
pub struct PruneArgs {
    /// Override the configured number of archives to keep
    #[arg(long)]
    pub keep: Option<usize>,
}

#[derive(clap::Args, Debug)]
pub struct ShowArgs {
    /// Date key of the section to print (DD_MM_YYYY); newest when omitted
    #[arg(long)]
    pub date: Option<String>,
}
