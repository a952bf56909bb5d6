//! Library management commands

use super::Context;
use anyhow::{bail, Result};
use nook_core::types::{BookUpdate, LibraryBook};

fn status(book: &LibraryBook) -> String {
    if book.is_read {
        "read".to_string()
    } else if book.reading_progress > 0 {
        format!("{}%", book.reading_progress)
    } else {
        "unread".to_string()
    }
}

fn print_row(book: &LibraryBook) {
    println!(
        "{:<16} {} by {} [{}]",
        book.id(),
        book.title(),
        book.book.authors.join(", "),
        status(book)
    );
}

fn not_found(id: &str) -> anyhow::Error {
    anyhow::anyhow!("No book with id '{}' in the library", id)
}

/// List the library, optionally filtered by category
pub fn list(ctx: &Context, category: Option<&str>, json: bool) -> Result<()> {
    let library = ctx.library();
    let books = match category {
        Some(category) => library.books_in_category(category),
        None => library.books(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        println!("Your library is empty");
        return Ok(());
    }
    for book in &books {
        print_row(book);
    }
    Ok(())
}

/// Show every detail of one book
pub fn show(ctx: &Context, id: &str, json: bool) -> Result<()> {
    let library = ctx.library();
    let book = library.book(id).ok_or_else(|| not_found(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(book)?);
        return Ok(());
    }

    println!("Title:       {}", book.title());
    println!("Authors:     {}", book.book.authors.join(", "));
    if !book.book.published_date.is_empty() {
        println!("Published:   {}", book.book.published_date);
    }
    if book.book.page_count > 0 {
        println!("Pages:       {}", book.book.page_count);
    }
    if !book.book.categories.is_empty() {
        println!("Categories:  {}", book.book.categories.join(", "));
    }
    println!("Language:    {}", book.book.language);
    println!("Added:       {}", book.date_added.format("%Y-%m-%d %H:%M"));
    println!("Status:      {}", status(book));
    if !book.notes.is_empty() {
        println!("Notes:       {}", book.notes);
    }
    if !book.book.description.is_empty() {
        println!();
        println!("{}", book.book.description);
    }
    Ok(())
}

/// Remove a book
pub fn remove(ctx: &Context, id: &str) -> Result<()> {
    if !ctx.library().remove_book(id) {
        return Err(not_found(id));
    }
    println!("Removed {}", id);
    Ok(())
}

/// Set reading progress
pub fn progress(ctx: &Context, id: &str, percent: i64) -> Result<()> {
    let mut library = ctx.library();
    if !library.update_progress(id, percent) {
        return Err(not_found(id));
    }
    if let Some(book) = library.book(id) {
        println!("'{}' is {}% read", book.title(), book.reading_progress);
    }
    Ok(())
}

/// Mark a book read
pub fn mark_read(ctx: &Context, id: &str) -> Result<()> {
    let mut library = ctx.library();
    if !library.mark_as_read(id) {
        return Err(not_found(id));
    }
    if let Some(book) = library.book(id) {
        println!("Marked '{}' as read", book.title());
    }
    Ok(())
}

/// Replace a book's notes
pub fn note(ctx: &Context, id: &str, text: &str) -> Result<()> {
    if !ctx.library().update_book(id, BookUpdate::new().notes(text)) {
        return Err(not_found(id));
    }
    println!("Notes updated for {}", id);
    Ok(())
}

/// Empty the library
pub fn clear(ctx: &Context, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to clear the library without --yes");
    }
    let mut library = ctx.library();
    let count = library.len();
    library.clear_library();
    println!("Removed {} books", count);
    Ok(())
}
