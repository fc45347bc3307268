//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Generate a deterministic cache key from endpoint and parameters.
///
/// The key is a SHA-256 hash of the endpoint, region, and sorted parameters.
/// This ensures consistent keys regardless of parameter order.
pub fn cache_key(endpoint: &str, region: Option<&str>, params: &[(&str, &str)]) -> String {
    let mut hasher = Sha256::new();

    // Include endpoint
    hasher.update(endpoint.as_bytes());
    hasher.update(b"|");

    // Include region
    if let Some(region) = region {
        hasher.update(region.as_bytes());
    }
    hasher.update(b"|");

    // Sort and include params for deterministic key
    let mut sorted_params: Vec<_> = params.iter().collect();
    sorted_params.sort_by_key(|(k, _)| *k);

    for (k, v) in sorted_params {
        hasher.update(k.as_bytes());
        hasher.update(b"=");
        hasher.update(v.as_bytes());
        hasher.update(b"&");
    }

    // Return hex-encoded hash
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_deterministic() {
        let key1 = cache_key(
            "list_things",
            Some("us-east-1"),
            &[("maxResults", "10"), ("nextToken", "t1")],
        );
        let key2 = cache_key(
            "list_things",
            Some("us-east-1"),
            &[("nextToken", "t1"), ("maxResults", "10")],
        );

        // Same inputs in different order should produce same key
        assert_eq!(key1, key2);
    }

    #[test]
    fn test_cache_key_different_endpoints() {
        let key1 = cache_key("list_things", Some("us-east-1"), &[]);
        let key2 = cache_key("list_certificates", Some("us-east-1"), &[]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_different_regions() {
        let key1 = cache_key("list_things", Some("us-east-1"), &[]);
        let key2 = cache_key("list_things", Some("eu-central-1"), &[]);

        assert_ne!(key1, key2);
    }

    #[test]
    fn test_cache_key_no_region() {
        let key1 = cache_key("list_things", None, &[]);
        let key2 = cache_key("list_things", None, &[]);

        assert_eq!(key1, key2);
    }
}
