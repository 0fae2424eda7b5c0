// The three user-facing workflows. Each one is a straight line:
// build a query, call the endpoint, print or persist the result.

use crate::api::SearchClient;
use crate::library::LibraryStore;
use crate::query::Query;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while a request is in flight.
fn spinner(msg: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// `search`: print every matching record, or nothing when there are no
/// matches.
pub fn search(client: &SearchClient, author: String, filters: Vec<(String, String)>) -> Result<()> {
    let query = Query::with_filters(author, filters);

    let pb = spinner("Searching...");
    let result = client.search(&query);
    pb.finish_and_clear();

    let books = result.context("search failed")?;
    for book in &books {
        println!("{book}\n");
    }
    Ok(())
}

/// `add`: run a search constrained to one author and one catalogue id,
/// and save the matching record under its title. Zero matches is a
/// user-facing "not found", not a failure.
pub fn add(
    client: &SearchClient,
    store: &mut dyn LibraryStore,
    author: String,
    id: u64,
) -> Result<()> {
    let query = Query::new(author).filter("id", id.to_string());

    let pb = spinner("Searching...");
    let result = client.search(&query);
    pb.finish_and_clear();

    let mut books = result.context("search failed")?;
    if books.is_empty() {
        println!("Book you are looking for does not exist. Did you provide the correct author and id?");
        return Ok(());
    }
    if books.len() > 1 {
        eprintln!(
            "warning: {} records matched author and id, keeping the first",
            books.len()
        );
    }

    let book = books.swap_remove(0);
    let title = book.title.clone();
    store
        .add(book)
        .context("could not write to the library file")?;
    println!("{title} has been successfully added to your library file!");
    Ok(())
}

/// `show`: print every stored record and a trailing total count.
pub fn show(store: &dyn LibraryStore) -> Result<()> {
    for (_, book) in store.list() {
        println!("{book}\n");
    }
    println!("Total amount of books in your library: {}", store.count());
    Ok(())
}
