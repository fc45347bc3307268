//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod audit;
pub mod cache;
pub mod cert;
pub mod context;
pub mod handlers;
pub mod init;
pub mod logging;
pub mod mitigation;
pub mod policy;
pub mod profile;
pub mod status;
pub mod thing;
pub mod violation;

pub use args::{GlobalOptions, OutputFormat, PaginationArgs};
pub use context::CommandContext;

use args::{
    AuditTaskFilterArgs, EventFilterArgs, FindingFilterArgs, MitigationFilterArgs,
    SuppressionFilterArgs, ThingFilterArgs, ViolationFilterArgs,
};

/// SentraOp CLI - companion for the Sentra IoT device-management platform
#[derive(Parser, Debug)]
#[command(name = "sentraop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, global = true, env = "SENTRAOP_FORMAT", hide_env = true)]
    pub format: Option<OutputFormat>,

    /// Override platform region
    #[arg(long, global = true, env = "SENTRAOP_REGION", hide_env = true)]
    pub region: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "SENTRAOP_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "SENTRAOP_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "SENTRAOP_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Custom API host for development/testing
    #[arg(long, global = true, env = "SENTRAOP_API_HOST", hide_env = true)]
    pub api_host: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize SentraOp configuration
    Init,

    /// Show authentication and configuration status
    Status,

    /// Display version information
    Version,

    /// Manage things in the device registry
    #[command(subcommand)]
    Thing(ThingCommands),

    /// Manage device certificates and certificate providers
    #[command(subcommand)]
    Cert(CertCommands),

    /// Manage access policies
    #[command(subcommand)]
    Policy(PolicyCommands),

    /// Run audits and manage findings and suppressions
    #[command(subcommand)]
    Audit(AuditCommands),

    /// Inspect behavior violations
    #[command(subcommand)]
    Violation(ViolationCommands),

    /// Manage security profiles
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Manage mitigation actions
    #[command(subcommand)]
    Mitigation(MitigationCommands),

    /// View or change platform logging options
    #[command(subcommand)]
    Logging(LoggingCommands),

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   sentraop completion bash > /etc/bash_completion.d/sentraop
  zsh:    sentraop completion zsh > \"${fpath[1]}/_sentraop\"
  fish:   sentraop completion fish > ~/.config/fish/completions/sentraop.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Thing registry subcommands
#[derive(Subcommand, Debug)]
pub enum ThingCommands {
    /// List things in the registry
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filters: ThingFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Describe one or more things
    #[command(visible_alias = "g")]
    Get {
        /// Thing names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Create a thing
    Create {
        /// Thing name
        name: String,

        /// Thing type to assign
        #[arg(long = "type", short = 't')]
        thing_type: Option<String>,

        /// Attributes, as name=value (repeatable)
        #[arg(long, short = 'a', value_name = "NAME=VALUE")]
        attribute: Vec<String>,
    },

    /// Update a thing's type and attributes
    Update {
        /// Thing name
        name: String,

        /// Thing type to assign
        #[arg(long = "type", short = 't')]
        thing_type: Option<String>,

        /// Attributes, as name=value (repeatable)
        #[arg(long, short = 'a', value_name = "NAME=VALUE")]
        attribute: Vec<String>,

        /// Merge attributes into the existing map instead of replacing it
        #[arg(long)]
        merge: bool,

        /// Fail unless the registry version matches
        #[arg(long)]
        expected_version: Option<i64>,
    },

    /// Delete a thing
    Delete {
        /// Thing name
        name: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List principals attached to a thing
    Principals {
        /// Thing name
        name: String,
    },
}

/// Certificate subcommands
#[derive(Subcommand, Debug)]
pub enum CertCommands {
    /// List certificates
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Describe a certificate
    #[command(visible_alias = "g")]
    Get {
        /// Certificate ID
        id: String,
    },

    /// Set a certificate's status to ACTIVE
    Activate {
        /// Certificate ID
        id: String,
    },

    /// Set a certificate's status to INACTIVE
    Deactivate {
        /// Certificate ID
        id: String,
    },

    /// Set a certificate's status to REVOKED
    Revoke {
        /// Certificate ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// List certificate providers
    Providers,

    /// Describe a certificate provider
    Provider {
        /// Provider name
        name: String,
    },
}

/// Policy subcommands
#[derive(Subcommand, Debug)]
pub enum PolicyCommands {
    /// List policies
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Get a policy with its default version document
    #[command(visible_alias = "g")]
    Get {
        /// Policy name
        name: String,
    },

    /// Create a policy from a JSON document file
    Create {
        /// Policy name
        name: String,

        /// Path to the JSON policy document
        #[arg(long, short = 'f')]
        file: String,
    },

    /// Delete a policy
    Delete {
        /// Policy name
        name: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Audit subcommands
#[derive(Subcommand, Debug)]
pub enum AuditCommands {
    /// Start an on-demand audit task
    #[command(after_help = "\
Examples:
  sentraop audit start --check DEVICE_CERTIFICATE_EXPIRING_CHECK
  sentraop audit start -c CA_CERTIFICATE_EXPIRING_CHECK,LOGGING_ENABLED_CHECK")]
    Start {
        /// Checks to run, comma-separated or repeated
        #[arg(long = "check", short = 'c', required = true, value_delimiter = ',')]
        checks: Vec<String>,
    },

    /// List audit tasks
    Tasks {
        #[command(flatten)]
        filters: AuditTaskFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Describe an audit task with per-check results
    Task {
        /// Task ID
        id: String,
    },

    /// Cancel a running audit task
    Cancel {
        /// Task ID
        id: String,
    },

    /// List audit findings
    Findings {
        #[command(flatten)]
        filters: FindingFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// List audit suppressions
    Suppressions {
        #[command(flatten)]
        filters: SuppressionFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Suppress findings for a check/resource pair
    #[command(after_help = "\
Examples:
  sentraop audit suppress DEVICE_CERTIFICATE_EXPIRING_CHECK --cert-id ab12 --expires 2026-12-31
  sentraop audit suppress LOGGING_ENABLED_CHECK --account 123456 --indefinitely \\
      --description 'logging handled externally'")]
    Suppress {
        /// Check name
        check: String,

        #[command(flatten)]
        resource: audit::ResourceArgs,

        /// Expiration time (RFC 3339 or YYYY-MM-DD)
        #[arg(long, conflicts_with = "indefinitely")]
        expires: Option<String>,

        /// Suppress with no expiration
        #[arg(long)]
        indefinitely: bool,

        /// Why the suppression exists
        #[arg(long, short = 'd')]
        description: Option<String>,
    },

    /// Remove the suppression for a check/resource pair
    Unsuppress {
        /// Check name
        check: String,

        #[command(flatten)]
        resource: audit::ResourceArgs,
    },
}

/// Violation subcommands
#[derive(Subcommand, Debug)]
pub enum ViolationCommands {
    /// List violations currently in alarm
    Active {
        #[command(flatten)]
        filters: ViolationFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// List violation events within a time window
    Events {
        #[command(flatten)]
        filters: EventFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },
}

/// Security profile subcommands
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List security profiles
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Describe a security profile
    #[command(visible_alias = "g")]
    Get {
        /// Profile name
        name: String,
    },

    /// Create a security profile from a JSON definition file
    Create {
        /// Path to the JSON profile definition
        #[arg(long, short = 'f')]
        file: String,
    },

    /// Update a security profile from a JSON definition file
    Update {
        /// Profile name
        name: String,

        /// Path to the JSON profile definition
        #[arg(long, short = 'f')]
        file: String,
    },

    /// Delete a security profile
    Delete {
        /// Profile name
        name: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Mitigation action subcommands
#[derive(Subcommand, Debug)]
pub enum MitigationCommands {
    /// List mitigation actions
    #[command(visible_alias = "ls")]
    List {
        #[command(flatten)]
        filters: MitigationFilterArgs,

        #[command(flatten)]
        pagination: PaginationArgs,
    },

    /// Describe a mitigation action
    #[command(visible_alias = "g")]
    Get {
        /// Action name
        name: String,
    },

    /// Create a mitigation action from a JSON definition file
    Create {
        /// Path to the JSON action definition
        #[arg(long, short = 'f')]
        file: String,
    },

    /// Delete a mitigation action
    Delete {
        /// Action name
        name: String,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Logging option subcommands
#[derive(Subcommand, Debug)]
pub enum LoggingCommands {
    /// Show the account-wide logging options
    Get,

    /// Replace the account-wide logging options
    Set {
        /// Log level (DEBUG, INFO, WARN, ERROR, DISABLED)
        #[arg(long, short = 'l')]
        level: String,

        /// Role the platform assumes to write logs
        #[arg(long)]
        role_arn: Option<String>,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear all cached data
    Clear,
    /// Print cache directory path
    Path,
}
