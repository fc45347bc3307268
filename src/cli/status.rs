//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "SentraOp Configuration Status".bold());

    let config_result = Config::load_at(opts.config_ref());

    match config_result {
        Ok(config) => {
            // Show config file location
            let config_path = Config::resolve_path(opts.config_ref())?;
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            // API key status
            if config.api_key.is_some() {
                println!("{} API key configured", "✓".green());
            } else {
                println!("{} API key not configured", "✗".red());
                println!("  → Run 'sentraop init' to configure");
            }

            // Session token status
            if let Some(ref session) = config.session {
                if config.is_token_expired() {
                    println!(
                        "{} Session token expired (will refresh on next command)",
                        "⚠".yellow()
                    );
                } else {
                    let remaining = session.expires_at.signed_duration_since(chrono::Utc::now());
                    let hours = remaining.num_hours();
                    let mins = remaining.num_minutes() % 60;

                    println!(
                        "{} Session token valid (expires in {}h {}m)",
                        "✓".green(),
                        hours,
                        mins
                    );
                }
            } else {
                println!(
                    "{} Session token not cached (will authenticate on next command)",
                    "○".dimmed()
                );
            }

            // Region status
            let region = opts.region_ref().or(config.region.as_deref());
            match region {
                Some(region) => println!("{} Region: {}", "✓".green(), region),
                None => println!("{} No region set (defaulting to us-east-1)", "○".dimmed()),
            }

            // API host status (only show if custom)
            if let Some(ref host) = config.api_host {
                println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
            }
        }
        Err(_) => {
            println!("{} No configuration found", "✗".red());
            println!("  → Run 'sentraop init' to get started");
        }
    }

    Ok(())
}
