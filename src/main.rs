// Entrypoint for the CLI application.
// - Keeps `main` small: decode the subcommand, build the client and the
//   store it needs, hand off to `commands`.
// - Returns `anyhow::Result` so every failure prints a diagnostic and
//   exits non-zero.

use anyhow::{Context, Result};
use clap::Parser;

use bibshelf_cli::api::SearchClient;
use bibshelf_cli::cli::{parse_filters, Cli, Commands};
use bibshelf_cli::commands;
use bibshelf_cli::library::JsonFileLibrary;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let library_path = cli.library.unwrap_or_else(JsonFileLibrary::default_path);

    match cli.command {
        Commands::Search(args) => {
            let filters = parse_filters(&args.filters)?;
            let client = SearchClient::from_env()?;
            commands::search(&client, args.author, filters)
        }
        Commands::Add(args) => {
            let client = SearchClient::from_env()?;
            let mut store = JsonFileLibrary::open(&library_path)
                .with_context(|| format!("could not open library file {}", library_path.display()))?;
            commands::add(&client, &mut store, args.author, args.id)
        }
        Commands::Show(args) => {
            if !args.extra.is_empty() {
                eprintln!(
                    "show takes no arguments; ignoring: {}",
                    args.extra.join(" ")
                );
            }
            let store = JsonFileLibrary::open(&library_path)
                .with_context(|| format!("could not open library file {}", library_path.display()))?;
            commands::show(&store)
        }
    }
}
