//! Platform logging option commands

use colored::Colorize;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::client::RegistryApi;
use crate::client::models::LoggingOptions;
use crate::error::Result;
use crate::output;

/// Run the logging get command
pub async fn get(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let options = ctx.client.get_logging_options().await?;
    output::print_detail(&options, ctx.format)
}

/// Run the logging set command
pub async fn set(opts: &GlobalOptions, level: &str, role_arn: Option<&str>) -> Result<()> {
    let mut options = LoggingOptions::new().log_level(level);
    if let Some(role_arn) = role_arn {
        options = options.role_arn(role_arn);
    }

    let ctx = CommandContext::new(opts).await?;
    ctx.client.set_logging_options(&options).await?;

    println!("{} Logging options updated ({})", "✓".green(), level.bold());
    Ok(())
}
