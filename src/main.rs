//! SentraOp CLI - companion for the Sentra IoT device-management platform

use clap::{CommandFactory, Parser};

mod cache;
mod cli;
mod client;
mod config;
mod error;
mod models;
mod output;

use cli::{
    AuditCommands, CacheCommands, CertCommands, Cli, Commands, GlobalOptions, LoggingCommands,
    MitigationCommands, PolicyCommands, ProfileCommands, ThingCommands, ViolationCommands,
};
use client::models::CertificateStatus;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG still wins when set explicitly
    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug && std::env::var_os("RUST_LOG").is_none() {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Version => {
            println!("sentraop version {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::Thing(thing_cmd) => match thing_cmd {
            ThingCommands::List { filters, pagination } => {
                cli::thing::list(&opts, &filters, &pagination).await
            }
            ThingCommands::Get { names } => cli::thing::get(&opts, &names).await,
            ThingCommands::Create {
                name,
                thing_type,
                attribute,
            } => cli::thing::create(&opts, &name, thing_type.as_deref(), &attribute).await,
            ThingCommands::Update {
                name,
                thing_type,
                attribute,
                merge,
                expected_version,
            } => {
                cli::thing::update(
                    &opts,
                    &name,
                    thing_type.as_deref(),
                    &attribute,
                    merge,
                    expected_version,
                )
                .await
            }
            ThingCommands::Delete { name, yes } => cli::thing::delete(&opts, &name, yes).await,
            ThingCommands::Principals { name } => cli::thing::principals(&opts, &name).await,
        },
        Commands::Cert(cert_cmd) => match cert_cmd {
            CertCommands::List { pagination } => cli::cert::list(&opts, &pagination).await,
            CertCommands::Get { id } => cli::cert::get(&opts, &id).await,
            CertCommands::Activate { id } => {
                cli::cert::set_status(&opts, &id, CertificateStatus::Active).await
            }
            CertCommands::Deactivate { id } => {
                cli::cert::set_status(&opts, &id, CertificateStatus::Inactive).await
            }
            CertCommands::Revoke { id, yes } => cli::cert::revoke(&opts, &id, yes).await,
            CertCommands::Providers => cli::cert::providers(&opts).await,
            CertCommands::Provider { name } => cli::cert::provider(&opts, &name).await,
        },
        Commands::Policy(policy_cmd) => match policy_cmd {
            PolicyCommands::List { pagination } => cli::policy::list(&opts, &pagination).await,
            PolicyCommands::Get { name } => cli::policy::get(&opts, &name).await,
            PolicyCommands::Create { name, file } => {
                cli::policy::create(&opts, &name, &file).await
            }
            PolicyCommands::Delete { name, yes } => cli::policy::delete(&opts, &name, yes).await,
        },
        Commands::Audit(audit_cmd) => match audit_cmd {
            AuditCommands::Start { checks } => cli::audit::start(&opts, &checks).await,
            AuditCommands::Tasks { filters, pagination } => {
                cli::audit::tasks(&opts, &filters, &pagination).await
            }
            AuditCommands::Task { id } => cli::audit::task(&opts, &id).await,
            AuditCommands::Cancel { id } => cli::audit::cancel(&opts, &id).await,
            AuditCommands::Findings { filters, pagination } => {
                cli::audit::findings(&opts, &filters, &pagination).await
            }
            AuditCommands::Suppressions { filters, pagination } => {
                cli::audit::suppressions(&opts, &filters, &pagination).await
            }
            AuditCommands::Suppress {
                check,
                resource,
                expires,
                indefinitely,
                description,
            } => {
                cli::audit::suppress(
                    &opts,
                    &check,
                    &resource,
                    expires.as_deref(),
                    indefinitely,
                    description.as_deref(),
                )
                .await
            }
            AuditCommands::Unsuppress { check, resource } => {
                cli::audit::unsuppress(&opts, &check, &resource).await
            }
        },
        Commands::Violation(violation_cmd) => match violation_cmd {
            ViolationCommands::Active { filters, pagination } => {
                cli::violation::active(&opts, &filters, &pagination).await
            }
            ViolationCommands::Events { filters, pagination } => {
                cli::violation::events(&opts, &filters, &pagination).await
            }
        },
        Commands::Profile(profile_cmd) => match profile_cmd {
            ProfileCommands::List { pagination } => cli::profile::list(&opts, &pagination).await,
            ProfileCommands::Get { name } => cli::profile::get(&opts, &name).await,
            ProfileCommands::Create { file } => cli::profile::create(&opts, &file).await,
            ProfileCommands::Update { name, file } => {
                cli::profile::update(&opts, &name, &file).await
            }
            ProfileCommands::Delete { name, yes } => {
                cli::profile::delete(&opts, &name, yes).await
            }
        },
        Commands::Mitigation(mitigation_cmd) => match mitigation_cmd {
            MitigationCommands::List { filters, pagination } => {
                cli::mitigation::list(&opts, &filters, &pagination).await
            }
            MitigationCommands::Get { name } => cli::mitigation::get(&opts, &name).await,
            MitigationCommands::Create { file } => cli::mitigation::create(&opts, &file).await,
            MitigationCommands::Delete { name, yes } => {
                cli::mitigation::delete(&opts, &name, yes).await
            }
        },
        Commands::Logging(logging_cmd) => match logging_cmd {
            LoggingCommands::Get => cli::logging::get(&opts).await,
            LoggingCommands::Set { level, role_arn } => {
                cli::logging::set(&opts, &level, role_arn.as_deref()).await
            }
        },
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::Status => cli::cache::status(),
            CacheCommands::Clear => cli::cache::clear(),
            CacheCommands::Path => cli::cache::path(),
        },
        Commands::Completion { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "sentraop", &mut std::io::stdout());
            Ok(())
        }
    }
}
