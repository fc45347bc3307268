//! Local cache for API responses
//!
//! Provides SQLite-backed caching of read responses to speed up repeated
//! listings and reduce API calls. Mutations invalidate the endpoints they
//! touch.

pub mod client;
pub mod key;
pub mod storage;

use std::time::Duration;

/// Cache TTL configuration per data type
///
/// These constants define caching duration for each type of API response.
pub struct CacheTtl;

impl CacheTtl {
    // Registry data - attributes and fleet membership change slowly
    pub const THINGS: Duration = Duration::from_secs(10 * 60); // 10 min
    pub const CERTIFICATES: Duration = Duration::from_secs(60 * 60); // 1 hr
    pub const PROVIDERS: Duration = Duration::from_secs(60 * 60); // 1 hr
    pub const POLICIES: Duration = Duration::from_secs(60 * 60); // 1 hr
    pub const LOGGING: Duration = Duration::from_secs(60 * 60); // 1 hr

    // Audit data - tasks progress while running
    pub const AUDIT_TASKS: Duration = Duration::from_secs(5 * 60); // 5 min
    pub const AUDIT_TASK_DETAIL: Duration = Duration::from_secs(60); // 1 min
    pub const AUDIT_FINDINGS: Duration = Duration::from_secs(10 * 60); // 10 min
    pub const AUDIT_SUPPRESSIONS: Duration = Duration::from_secs(5 * 60); // 5 min

    // Detect data - violations move fast
    pub const VIOLATIONS: Duration = Duration::from_secs(60); // 1 min
    pub const VIOLATION_EVENTS: Duration = Duration::from_secs(10 * 60); // 10 min
    pub const SECURITY_PROFILES: Duration = Duration::from_secs(60 * 60); // 1 hr
    pub const MITIGATION_ACTIONS: Duration = Duration::from_secs(60 * 60); // 1 hr
}

// Re-export main types
pub use client::CachedSentraClient;
pub use key::cache_key;
pub use storage::CacheStorage;
