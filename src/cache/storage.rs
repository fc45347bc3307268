//! SQLite-based cache storage
//!
//! Responses here are bounded by the API's page size, so rows are stored
//! inline in a single table.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::CacheError;

/// Schema version - increment to trigger nuke-and-rebuild
const SCHEMA_VERSION: i32 = 1;

type Result<T> = std::result::Result<T, CacheError>;

/// SQLite-backed cache storage
pub struct CacheStorage {
    conn: Connection,
}

/// Statistics about the cache contents
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
    pub total_size_bytes: usize,
}

/// Result of clearing the cache
#[derive(Debug, Clone)]
pub struct ClearStats {
    pub entries_removed: usize,
}

impl CacheStorage {
    /// Open or create cache storage at the default XDG cache location
    pub fn open() -> Result<Self> {
        let cache_dir = Self::cache_dir()?;
        Self::open_at(&cache_dir)
    }

    /// Get the cache directory path (~/.cache/sentraop on Linux/macOS)
    pub fn cache_dir() -> Result<PathBuf> {
        let cache_base = dirs::cache_dir().ok_or(CacheError::NoHome)?;
        Ok(cache_base.join("sentraop"))
    }

    /// Open cache storage at a specific directory (for testing)
    pub fn open_at(cache_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(cache_dir)
            .map_err(|e| CacheError::Io(format!("Failed to create cache dir: {}", e)))?;

        let db_path = cache_dir.join("cache.db");
        let conn = Connection::open(&db_path)?;

        // Check schema version - nuke if mismatched
        let version: i32 = conn
            .pragma_query_value(None, "user_version", |r| r.get(0))
            .unwrap_or(0);

        if version != 0 && version != SCHEMA_VERSION {
            log::info!(
                "Cache schema version mismatch ({} != {}), rebuilding",
                version,
                SCHEMA_VERSION
            );
            drop(conn);
            std::fs::remove_file(&db_path)
                .map_err(|e| CacheError::Io(format!("Failed to remove stale cache: {}", e)))?;
            return Self::open_at(cache_dir);
        }

        // Initialize schema
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS cache_entries (
                cache_key TEXT PRIMARY KEY NOT NULL,
                region TEXT,
                endpoint TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                expires_at INTEGER NOT NULL,
                size_bytes INTEGER NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_expires_at ON cache_entries(expires_at);
            CREATE INDEX IF NOT EXISTS idx_endpoint ON cache_entries(endpoint);
            "#,
        )?;

        conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

        Ok(Self { conn })
    }

    /// Get cached data if valid (not expired)
    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Utc::now().timestamp();

        let result: Option<String> = self
            .conn
            .query_row(
                "SELECT data FROM cache_entries
                 WHERE cache_key = ?1 AND expires_at > ?2",
                params![key, now],
                |row| row.get(0),
            )
            .optional()?;

        Ok(result.map(String::into_bytes))
    }

    /// Store data with TTL
    pub fn put(
        &self,
        key: &str,
        data: &[u8],
        endpoint: &str,
        region: Option<&str>,
        ttl: Duration,
    ) -> Result<()> {
        let now = Utc::now().timestamp();
        let expires = now + ttl.as_secs() as i64;

        self.conn.execute(
            "INSERT OR REPLACE INTO cache_entries
             (cache_key, region, endpoint, data, created_at, expires_at, size_bytes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                key,
                region,
                endpoint,
                String::from_utf8_lossy(data).to_string(),
                now,
                expires,
                data.len()
            ],
        )?;
        Ok(())
    }

    /// Clear all cache entries
    pub fn clear_all(&self) -> Result<ClearStats> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;

        self.conn.execute("DELETE FROM cache_entries", [])?;

        Ok(ClearStats {
            entries_removed: count as usize,
        })
    }

    /// Delete cache entries by endpoint and optional region
    ///
    /// Used to invalidate cache after mutations. For example:
    /// - `delete_by_endpoint("list_things", None)` - clears thing list cache
    /// - `delete_by_endpoint("describe_thing", Some("us-east-1"))` - clears
    ///   thing detail caches for one region
    pub fn delete_by_endpoint(&self, endpoint: &str, region: Option<&str>) -> Result<usize> {
        let deleted = match region {
            Some(region) => self.conn.execute(
                "DELETE FROM cache_entries WHERE endpoint = ?1 AND region = ?2",
                params![endpoint, region],
            )?,
            None => self.conn.execute(
                "DELETE FROM cache_entries WHERE endpoint = ?1",
                params![endpoint],
            )?,
        };
        Ok(deleted)
    }

    /// Get cache statistics
    pub fn stats(&self) -> Result<CacheStats> {
        let now = Utc::now().timestamp();

        let total_entries: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM cache_entries", [], |r| r.get(0))?;

        let valid_entries: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM cache_entries WHERE expires_at > ?1",
            [now],
            |r| r.get(0),
        )?;

        let total_size: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(size_bytes), 0) FROM cache_entries",
            [],
            |r| r.get(0),
        )?;

        Ok(CacheStats {
            total_entries: total_entries as usize,
            valid_entries: valid_entries as usize,
            expired_entries: (total_entries - valid_entries) as usize,
            total_size_bytes: total_size as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_put_and_get() {
        let dir = tempdir().unwrap();
        let storage = CacheStorage::open_at(dir.path()).unwrap();

        storage
            .put("key-1", b"[1,2,3]", "list_things", None, Duration::from_secs(60))
            .unwrap();

        let data = storage.get("key-1").unwrap().unwrap();
        assert_eq!(data, b"[1,2,3]");
    }

    #[test]
    fn test_get_expired_entry_is_none() {
        let dir = tempdir().unwrap();
        let storage = CacheStorage::open_at(dir.path()).unwrap();

        storage
            .put("key-1", b"{}", "list_things", None, Duration::from_secs(0))
            .unwrap();

        assert!(storage.get("key-1").unwrap().is_none());
    }

    #[test]
    fn test_clear_all() {
        let dir = tempdir().unwrap();
        let storage = CacheStorage::open_at(dir.path()).unwrap();

        storage
            .put("key-1", b"{}", "list_things", None, Duration::from_secs(60))
            .unwrap();
        storage
            .put("key-2", b"{}", "list_certificates", None, Duration::from_secs(60))
            .unwrap();

        let stats = storage.clear_all().unwrap();
        assert_eq!(stats.entries_removed, 2);
        assert!(storage.get("key-1").unwrap().is_none());
    }

    #[test]
    fn test_delete_by_endpoint() {
        let dir = tempdir().unwrap();
        let storage = CacheStorage::open_at(dir.path()).unwrap();

        storage
            .put("key-1", b"{}", "list_things", Some("us-east-1"), Duration::from_secs(60))
            .unwrap();
        storage
            .put("key-2", b"{}", "list_things", Some("eu-central-1"), Duration::from_secs(60))
            .unwrap();
        storage
            .put("key-3", b"{}", "list_certificates", None, Duration::from_secs(60))
            .unwrap();

        let deleted = storage
            .delete_by_endpoint("list_things", Some("us-east-1"))
            .unwrap();
        assert_eq!(deleted, 1);
        assert!(storage.get("key-1").unwrap().is_none());
        assert!(storage.get("key-2").unwrap().is_some());

        let deleted = storage.delete_by_endpoint("list_certificates", None).unwrap();
        assert_eq!(deleted, 1);
    }

    #[test]
    fn test_stats_counts_validity() {
        let dir = tempdir().unwrap();
        let storage = CacheStorage::open_at(dir.path()).unwrap();

        storage
            .put("live", b"{}", "list_things", None, Duration::from_secs(60))
            .unwrap();
        storage
            .put("dead", b"{}", "list_things", None, Duration::from_secs(0))
            .unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.valid_entries, 1);
        assert_eq!(stats.expired_entries, 1);
        assert!(stats.total_size_bytes > 0);
    }
}
