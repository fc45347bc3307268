//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, authentication validation, and client initialization.

use std::sync::Arc;

use crate::cache::CachedSentraClient;
use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::models::SessionToken;
use crate::client::{AuthApi, SentraClient};
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
///
/// This struct encapsulates all shared state needed by commands, providing:
/// - Loaded and validated configuration
/// - Authenticated API client with session token set (Arc-wrapped for fan-out)
/// - Resolved output format preference
pub struct CommandContext {
    /// Loaded and validated configuration
    pub config: Config,
    /// Authenticated API client with caching
    pub client: Arc<CachedSentraClient<SentraClient>>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context with full initialization.
    ///
    /// This handles:
    /// - Loading config from path (or default location)
    /// - Applying region/API-host overrides
    /// - Validating authentication (API key present)
    /// - Creating the API client with caching wrapper
    /// - Authenticating and caching the session token
    ///
    /// # Errors
    /// Returns error if config cannot be loaded or authentication is invalid.
    pub async fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;
        config.validate_auth()?;

        // Apply overrides if provided
        if let Some(region) = opts.region_ref() {
            config.region = Some(region.to_string());
        }
        if let Some(host) = opts.api_host_ref() {
            config.api_host = Some(host.to_string());
        }

        // Create the raw client first (need to set the token before wrapping)
        let raw_client =
            SentraClient::with_host(config.api_key.clone(), config.resolve_api_host())?;

        // Use cached session token if valid, otherwise authenticate and cache
        if !config.is_token_expired() {
            if let Some(ref session) = config.session {
                raw_client
                    .set_token(SessionToken {
                        token: session.token.clone(),
                        expires_at: session.expires_at,
                    })
                    .await;
            }
        } else {
            let api_key = config.api_key.clone().expect("validated above");
            let session = raw_client.authenticate(&api_key).await?;

            // Save to config for future runs
            config.session = Some(crate::config::SessionToken {
                token: session.token.clone(),
                expires_at: session.expires_at,
            });
            config.save_at(opts.config_ref())?;

            raw_client.set_token(session).await;
        }

        // Wrap with caching layer (disabled if --no-cache)
        let client = Arc::new(CachedSentraClient::new(
            raw_client,
            !opts.no_cache,
            config.region.clone(),
        ));

        // CLI flag wins over the config preference
        let format = opts.format.unwrap_or_else(|| {
            match config.preferences.format.as_deref() {
                Some("json") => OutputFormat::Json,
                _ => OutputFormat::Table,
            }
        });

        Ok(Self {
            config,
            client,
            format,
        })
    }
}
