//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::client::{AuthApi, SentraClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// During interactive setup, the default production API is used. Custom API
/// hosts can be configured manually in the config file or via environment
/// variables after initialization.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to SentraOp!".bold().green());
    println!("Let's set up your Sentra configuration.\n");

    // Prompt for API key
    let api_key: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your Sentra API key")
        .interact()?;

    // Prompt for region
    let region: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Platform region")
        .default("us-east-1".to_string())
        .interact_text()?;

    let mut config = Config {
        api_key: Some(api_key.clone()),
        region: Some(region),
        api_host: opts.api_host.clone(),
        ..Config::default()
    };

    // Authenticate and cache the session token
    println!("\n{}", "Authenticating...".cyan());
    let client = SentraClient::with_host(Some(api_key.clone()), config.resolve_api_host())?;
    let session = client.authenticate(&api_key).await?;

    println!("{}", "✓ Authentication successful!".green());

    config.session = Some(crate::config::SessionToken {
        token: session.token,
        expires_at: session.expires_at,
    });

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    println!("\nTry: {}", "sentraop thing list".bold());

    Ok(())
}
