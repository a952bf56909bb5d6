//! Catalog search commands

use super::Context;
use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};
use nook_core::search::DEFAULT_MAX_RESULTS;
use nook_core::types::BookRecord;
use nook_core::{CatalogSearchService, GoogleBooksClient};
use std::time::Duration;

/// Run a search behind a spinner
async fn run_search(
    service: &mut CatalogSearchService<GoogleBooksClient>,
    query: &str,
    max_results: u32,
) -> Vec<BookRecord> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("Searching for '{}'...", query.trim()));

    let books = service.search_books(query, max_results).await;

    pb.finish_and_clear();
    books
}

fn print_result(position: usize, book: &BookRecord, in_library: bool) {
    let marker = if in_library { " (in library)" } else { "" };
    println!(
        "{:>2}. {} by {}{}",
        position,
        book.title,
        book.authors.join(", "),
        marker
    );
    let mut details = vec![format!("id: {}", book.id)];
    if !book.published_date.is_empty() {
        details.push(book.published_date.clone());
    }
    if book.page_count > 0 {
        details.push(format!("{} pages", book.page_count));
    }
    if book.ratings_count > 0 {
        details.push(format!(
            "rated {:.1} ({} ratings)",
            book.average_rating, book.ratings_count
        ));
    }
    println!("    {}", details.join(" | "));
}

/// Search the catalog and print the results
pub async fn search(ctx: &Context, query: &str, max_results: u32, json: bool) -> Result<()> {
    let mut service = ctx.search_service()?;
    let books = run_search(&mut service, query, max_results).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("No results for '{}'", query.trim());
        return Ok(());
    }

    let library = ctx.library();
    for (i, book) in books.iter().enumerate() {
        print_result(i + 1, book, library.has_book(&book.id));
    }
    Ok(())
}

/// Print or clear the recent-search history
pub fn recent(ctx: &Context, clear: bool) -> Result<()> {
    let mut service = ctx.search_service()?;

    if clear {
        service.clear_recent_searches();
        println!("Recent searches cleared");
        return Ok(());
    }

    if service.recent_searches().is_empty() {
        println!("No recent searches");
    }
    for query in service.recent_searches() {
        println!("{}", query);
    }
    Ok(())
}

/// Search, then add the result at `position` (1-based) to the library
pub async fn add(ctx: &Context, query: &str, position: usize) -> Result<()> {
    let mut service = ctx.search_service()?;
    let wanted = u32::try_from(position).unwrap_or(u32::MAX).max(DEFAULT_MAX_RESULTS);
    let books = run_search(&mut service, query, wanted).await;

    let Some(book) = books.into_iter().nth(position.saturating_sub(1)) else {
        bail!("No search result at position {} for '{}'", position, query.trim());
    };

    let title = book.title.clone();
    let id = book.id.clone();
    let mut library = ctx.library();
    if library.add_book(book) {
        tracing::debug!(book_id = %id, "book added from search");
        println!("Added '{}' ({})", title, id);
    } else {
        println!("'{}' ({}) is already in your library", title, id);
    }
    Ok(())
}
