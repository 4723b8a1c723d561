use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(
    name = "bibdex",
    about = "A fast literature search CLI for bibliographic reference datasets"
)]
pub struct Cli {
    /// Path to the references JSON file (overrides BIBDEX_DATASET)
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search records by similarity
    Search(SearchArgs),
    /// List records, newest first
    List(ListArgs),
    /// Show one record in full
    Show(ShowArgs),
    /// Start an interactive session with collections
    Shell,
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Search --

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// The search query
    pub query: String,

    /// Number of results to return
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Return all matching results
    #[arg(long)]
    pub all: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// -- List --

#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Keep only records from this year
    #[arg(long)]
    pub year: Option<i32>,

    /// Number of records to skip
    #[arg(long, default_value = "0")]
    pub offset: usize,

    /// Maximum number of records to print
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output records as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Show --

#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Record id: full hex, a prefix of it, or #-prefixed
    pub id: String,

    /// Output the record as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "bibdex",
            &mut std::io::stdout(),
        );
    }
}
