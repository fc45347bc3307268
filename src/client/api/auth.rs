//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::SessionToken;
use crate::error::Result;

/// Authentication operations for the Sentra API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Authenticate with API key and get a session token
    async fn authenticate(&self, api_key: &str) -> Result<SessionToken>;
}
