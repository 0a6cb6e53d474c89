//! logihash CLI
//!
//! Command-line interface for the logical hash engine

use clap::{Parser, Subcommand};
use logihash_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "logihash")]
#[command(about = "logihash - Salted structural hashing", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Draw a fresh salt table and emit it as engine config
    Salts(commands::salts::SaltsArgs),
    /// Hash a JSON document
    Hash(commands::hash::HashArgs),
    /// Show which properties a declaration selects, in salt order
    Select(commands::select::SelectArgs),
}

fn main() {
    init(Profile::Development);
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Salts(args) => commands::salts::execute(args),
        Commands::Hash(args) => commands::hash::execute(args),
        Commands::Select(args) => commands::select::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
