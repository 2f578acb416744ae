pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "shelf",
    about = "Shelf operator CLI",
    long_about = "Inspect the product catalog, run the query engine from the terminal, and validate runtime readiness.",
    after_help = "Examples:\n  shelf doctor --json\n  shelf config\n  shelf catalog --category laptop --price-max 60000 --query coding\n  shelf smoke"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Query the builtin catalog with the same filters the HTTP API accepts")]
    Catalog {
        #[arg(long, help = "Case-insensitive substring matched against name and tags")]
        query: Option<String>,
        #[arg(long, help = "Exact category, compared case-insensitively")]
        category: Option<String>,
        #[arg(long, help = "Inclusive lower price bound; unusable values are ignored")]
        price_min: Option<String>,
        #[arg(long, help = "Inclusive upper price bound; unusable values are ignored")]
        price_max: Option<String>,
        #[arg(long, help = "Result cap; unusable values fall back to the default")]
        limit: Option<String>,
        #[arg(long, help = "Look up a single product by exact id instead of filtering")]
        id: Option<String>,
    },
    #[command(
        about = "Inspect effective configuration values with source attribution"
    )]
    Config,
    #[command(about = "Validate config, catalog integrity, and bind address readiness")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Run end-to-end readiness checks with per-check timing details")]
    Smoke,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Catalog { query, category, price_min, price_max, limit, id } => {
            commands::catalog::run(commands::catalog::CatalogArgs {
                query,
                category,
                price_min,
                price_max,
                limit,
                id,
            })
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => {
            commands::CommandResult { exit_code: 0, output: commands::doctor::run(json) }
        }
        Command::Smoke => commands::smoke::run(),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
