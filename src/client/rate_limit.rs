//! Per-endpoint rate limiting for the Sentra API
//!
//! Implements reactive rate limiting that only activates after receiving a
//! 429. Different endpoint families have different rate limits.

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicBool, Ordering};

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use tokio::sync::RwLock;

/// Categories of API endpoints with their rate limits.
///
/// Rate limits follow the published Sentra API quotas:
/// - Registry reads (things, certificates, policies): 4800/min (80/sec)
/// - Audit and detect reads: 600/min (10/sec)
/// - Mutations anywhere: 360/min (6/sec)
/// - Everything else: 360/min (6/sec)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointCategory {
    /// GET /things*, /certificates*, /policies* - 80 req/sec
    RegistryRead,
    /// GET /audit/* - 10 req/sec
    AuditRead,
    /// GET /detect/* - 10 req/sec
    DetectRead,
    /// POST/PATCH/DELETE anywhere - 6 req/sec
    Mutation,
    /// Default for all other endpoints - 6 req/sec
    Default,
}

impl EndpointCategory {
    /// All endpoint categories for initialization.
    pub const ALL: [EndpointCategory; 5] = [
        EndpointCategory::RegistryRead,
        EndpointCategory::AuditRead,
        EndpointCategory::DetectRead,
        EndpointCategory::Mutation,
        EndpointCategory::Default,
    ];

    /// Categorize a request based on path and method.
    ///
    /// The path should be the API path without the base URL
    /// (e.g., "/things/front-door-42").
    pub fn from_request(path: &str, method: &reqwest::Method) -> Self {
        let path = path.strip_prefix("/api/v1").unwrap_or(path);

        if *method != reqwest::Method::GET {
            return EndpointCategory::Mutation;
        }

        if path.starts_with("/things")
            || path.starts_with("/certificates")
            || path.starts_with("/certificate-providers")
            || path.starts_with("/policies")
        {
            return EndpointCategory::RegistryRead;
        }

        if path.starts_with("/audit") {
            return EndpointCategory::AuditRead;
        }

        if path.starts_with("/detect") {
            return EndpointCategory::DetectRead;
        }

        EndpointCategory::Default
    }

    /// Get the rate limit for this category (requests per second).
    pub fn rate_limit(&self) -> u32 {
        match self {
            EndpointCategory::RegistryRead => 80,
            EndpointCategory::AuditRead => 10,
            EndpointCategory::DetectRead => 10,
            EndpointCategory::Mutation => 6,
            EndpointCategory::Default => 6,
        }
    }
}

/// Rate limiter state for a single endpoint category.
pub struct EndpointRateLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    active: AtomicBool,
    category: EndpointCategory,
}

impl EndpointRateLimiter {
    /// Create a new rate limiter for an endpoint category.
    pub fn new(category: EndpointCategory) -> Self {
        let quota =
            Quota::per_second(NonZeroU32::new(category.rate_limit()).unwrap_or(NonZeroU32::MIN));

        Self {
            limiter: RateLimiter::direct(quota),
            active: AtomicBool::new(false),
            category,
        }
    }

    /// Activate rate limiting for this category.
    pub fn activate(&self) {
        let was_active = self.active.swap(true, Ordering::SeqCst);
        if !was_active {
            debug!("Rate limiting activated for {:?}", self.category);
        }
    }

    /// Check if rate limiting is active.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Wait for permission if rate limiting is active.
    pub async fn wait_if_active(&self) {
        if self.is_active() {
            debug!("Waiting for rate limiter {:?}", self.category);
            self.limiter.until_ready().await;
        }
    }
}

/// Collection of rate limiters for all endpoint categories.
pub struct RateLimiterSet {
    limiters: RwLock<HashMap<EndpointCategory, EndpointRateLimiter>>,
}

impl Default for RateLimiterSet {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterSet {
    /// Create a new set of rate limiters for all endpoint categories.
    pub fn new() -> Self {
        let mut map = HashMap::new();

        // Pre-create limiters for all categories
        for category in EndpointCategory::ALL {
            map.insert(category, EndpointRateLimiter::new(category));
        }

        Self {
            limiters: RwLock::new(map),
        }
    }

    /// Wait for rate limit permission for a category (if active).
    pub async fn wait_for(&self, category: EndpointCategory) {
        let limiters = self.limiters.read().await;
        if let Some(limiter) = limiters.get(&category) {
            limiter.wait_if_active().await;
        }
    }

    /// Activate rate limiting for a category (called on 429).
    pub async fn activate(&self, category: EndpointCategory) {
        let limiters = self.limiters.read().await;
        if let Some(limiter) = limiters.get(&category) {
            limiter.activate();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_endpoints() {
        assert_eq!(
            EndpointCategory::from_request("/things", &reqwest::Method::GET),
            EndpointCategory::RegistryRead
        );
        assert_eq!(
            EndpointCategory::from_request("/api/v1/certificates/ab12", &reqwest::Method::GET),
            EndpointCategory::RegistryRead
        );
        assert_eq!(
            EndpointCategory::from_request("/policies/allow-telemetry", &reqwest::Method::GET),
            EndpointCategory::RegistryRead
        );
    }

    #[test]
    fn test_audit_and_detect_endpoints() {
        assert_eq!(
            EndpointCategory::from_request("/audit/tasks", &reqwest::Method::GET),
            EndpointCategory::AuditRead
        );
        assert_eq!(
            EndpointCategory::from_request("/detect/violations/active", &reqwest::Method::GET),
            EndpointCategory::DetectRead
        );
    }

    #[test]
    fn test_mutations_share_a_category() {
        assert_eq!(
            EndpointCategory::from_request("/things", &reqwest::Method::POST),
            EndpointCategory::Mutation
        );
        assert_eq!(
            EndpointCategory::from_request("/audit/suppressions", &reqwest::Method::POST),
            EndpointCategory::Mutation
        );
        assert_eq!(
            EndpointCategory::from_request("/policies/p", &reqwest::Method::DELETE),
            EndpointCategory::Mutation
        );
    }

    #[test]
    fn test_default_endpoints() {
        assert_eq!(
            EndpointCategory::from_request("/auth/login", &reqwest::Method::GET),
            EndpointCategory::Default
        );
        assert_eq!(
            EndpointCategory::from_request("/logging-options", &reqwest::Method::GET),
            EndpointCategory::Default
        );
    }

    #[test]
    fn test_rate_limits() {
        assert_eq!(EndpointCategory::RegistryRead.rate_limit(), 80);
        assert_eq!(EndpointCategory::AuditRead.rate_limit(), 10);
        assert_eq!(EndpointCategory::DetectRead.rate_limit(), 10);
        assert_eq!(EndpointCategory::Mutation.rate_limit(), 6);
        assert_eq!(EndpointCategory::Default.rate_limit(), 6);
    }

    #[test]
    fn test_endpoint_rate_limiter_activation() {
        let limiter = EndpointRateLimiter::new(EndpointCategory::RegistryRead);
        assert!(!limiter.is_active());

        limiter.activate();
        assert!(limiter.is_active());

        // Second activation should be idempotent
        limiter.activate();
        assert!(limiter.is_active());
    }

    #[tokio::test]
    async fn test_rate_limiter_set_creation() {
        let set = RateLimiterSet::new();
        let limiters = set.limiters.read().await;

        // All categories should be present
        for category in EndpointCategory::ALL {
            assert!(limiters.contains_key(&category));
        }
    }
}
