//! Cache management commands

use colored::Colorize;

use crate::cache::CacheStorage;
use crate::error::Result;

/// Run the cache status command
pub fn status() -> Result<()> {
    let storage = CacheStorage::open()?;
    let stats = storage.stats()?;

    println!("{}\n", "SentraOp Cache Status".bold());
    println!("Entries:     {} total", stats.total_entries);
    println!("  valid:     {}", stats.valid_entries);
    println!("  expired:   {}", stats.expired_entries);
    println!("Size:        {} bytes", stats.total_size_bytes);
    println!("Location:    {}", CacheStorage::cache_dir()?.display());

    Ok(())
}

/// Run the cache clear command
pub fn clear() -> Result<()> {
    let storage = CacheStorage::open()?;
    let result = storage.clear_all()?;

    println!(
        "{} Cleared {} cached response(s)",
        "✓".green(),
        result.entries_removed
    );
    Ok(())
}

/// Run the cache path command
pub fn path() -> Result<()> {
    println!("{}", CacheStorage::cache_dir()?.display());
    Ok(())
}
