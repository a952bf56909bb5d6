//! Stats command implementation

use super::Context;
use anyhow::Result;

/// Print reading-state counts
pub fn stats(ctx: &Context, json: bool) -> Result<()> {
    let library = ctx.library();
    let stats = library.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("Books:       {}", stats.total);
    println!("Read:        {}", stats.read);
    println!("In progress: {}", stats.in_progress);
    println!("Unread:      {}", stats.unread);

    let categories = library.categories();
    if !categories.is_empty() {
        println!("Categories:  {}", categories.join(", "));
    }
    Ok(())
}
