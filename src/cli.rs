use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

/// Top-level CLI definition for bibshelf.
#[derive(Parser, Debug)]
#[command(name = "bibshelf")]
#[command(
    about = "Search the Polish National Library catalogue and keep a local shelf of books",
    long_about = None
)]
pub struct Cli {
    /// Library file to read and write; defaults to a file under the
    /// platform data directory. Give this flag before the subcommand.
    #[arg(long, global = true)]
    pub library: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search for books by author, with optional extra filters.
    Search(SearchArgs),
    /// Fetch one record by author and catalogue id and save it locally.
    Add(AddArgs),
    /// Print every saved book and a total count.
    Show(ShowArgs),
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Author, comma separated: Sanderson,Brandon (a bare surname also works).
    pub author: String,

    /// Extra filters as `--name value` pairs, e.g. `--title Elantris
    /// --kind e-book`. Accepted names: https://data.bn.org.pl/docs/bibs
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub filters: Vec<String>,
}

/// Arguments for the `add` subcommand.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Author, comma separated: Sanderson,Brandon.
    pub author: String,

    /// Numeric catalogue id of the record to save.
    #[arg(long)]
    pub id: u64,
}

/// `show` takes no arguments; stray ones are collected so the command
/// can warn about them instead of failing.
#[derive(Args, Debug)]
pub struct ShowArgs {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    pub extra: Vec<String>,
}

/// Turn the raw trailing tokens of `search` into ordered (name, value)
/// pairs. Accepts `--name value` and `--name=value`; anything else is a
/// usage error.
pub fn parse_filters(raw: &[String]) -> Result<Vec<(String, String)>> {
    let mut filters = Vec::new();
    let mut tokens = raw.iter();
    while let Some(token) = tokens.next() {
        let name = match token.strip_prefix("--") {
            Some(name) if !name.is_empty() => name,
            _ => bail!("unexpected argument `{token}`; filters are given as `--name value`"),
        };
        if let Some((name, value)) = name.split_once('=') {
            filters.push((name.to_string(), value.to_string()));
        } else if let Some(value) = tokens.next() {
            filters.push((name.to_string(), value.clone()));
        } else {
            bail!("filter `--{name}` is missing a value");
        }
    }
    Ok(filters)
}
