//! Global CLI options shared across all commands
//!
//! This module provides a centralized struct for global CLI options,
//! eliminating the need to thread a handful of parameters through every
//! command handler.

use crate::cli::{Cli, OutputFormat};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// For most options, the precedence is: CLI flag > environment variable >
/// config file > default. This struct captures the CLI/env layer; config
/// file defaults are resolved later in `CommandContext`.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format override (table, json)
    pub format: Option<OutputFormat>,

    /// Region override (bypasses config file)
    pub region: Option<String>,

    /// Custom config file path (defaults to ~/.sentraop/config.yaml)
    pub config: Option<String>,

    /// Bypass cache and fetch fresh data from API
    pub no_cache: bool,

    /// Custom API host for development/testing
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    ///
    /// This is the primary constructor, called once in main.rs after parsing.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            region: cli.region.clone(),
            config: cli.config.clone(),
            no_cache: cli.no_cache,
            api_host: cli.api_host.clone(),
        }
    }

    /// Get region override as `Option<&str>`.
    pub fn region_ref(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API host override as `Option<&str>`.
    pub fn api_host_ref(&self) -> Option<&str> {
        self.api_host.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_options_accessors() {
        let opts = GlobalOptions {
            format: Some(OutputFormat::Json),
            region: Some("eu-central-1".to_string()),
            config: Some("/custom/path".to_string()),
            no_cache: true,
            api_host: Some("http://localhost:8080".to_string()),
        };

        assert_eq!(opts.region_ref(), Some("eu-central-1"));
        assert_eq!(opts.config_ref(), Some("/custom/path"));
        assert_eq!(opts.api_host_ref(), Some("http://localhost:8080"));
        assert_eq!(opts.format, Some(OutputFormat::Json));
        assert!(opts.no_cache);
    }

    #[test]
    fn test_global_options_defaults() {
        let opts = GlobalOptions {
            format: None,
            region: None,
            config: None,
            no_cache: false,
            api_host: None,
        };

        assert_eq!(opts.region_ref(), None);
        assert!(opts.format.is_none());
        assert!(!opts.no_cache);
    }
}
