//! Thing registry commands

use colored::Colorize;
use futures::future::try_join_all;

use crate::cli::args::{GlobalOptions, ThingFilterArgs};
use crate::cli::{CommandContext, PaginationArgs, handlers};
use crate::client::models::{CreateThingRequest, ThingSummary, UpdateThingRequest};
use crate::client::{RegistryApi, drain_pages};
use crate::error::{Error, Result};
use crate::models::ThingDisplay;
use crate::output;

/// Split repeated `name=value` CLI arguments into pairs
fn parse_attribute_args(attributes: &[String]) -> Result<Vec<(String, String)>> {
    attributes
        .iter()
        .map(|raw| {
            raw.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| {
                    Error::Other(format!("Invalid attribute '{}': use name=value", raw))
                })
        })
        .collect()
}

/// Run the thing list command
pub async fn list(
    opts: &GlobalOptions,
    filters: &ThingFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let api_filters = filters.to_params()?;

    handlers::run_list_command::<ThingSummary, ThingDisplay, _, _>(
        opts,
        pagination,
        "things",
        |client, params, limit| async move {
            drain_pages(limit, |token| {
                let client = client.clone();
                let filters = api_filters.clone();
                let mut params = params.clone();
                if let Some(token) = token {
                    params = params.next_token(token);
                }
                async move { client.list_things(Some(&params), Some(&filters)).await }
            })
            .await
        },
    )
    .await
}

/// Run the thing get command, describing several things concurrently
pub async fn get(opts: &GlobalOptions, names: &[String]) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    let descriptions = try_join_all(
        names
            .iter()
            .map(|name| ctx.client.describe_thing(name)),
    )
    .await?;

    output::print_detail(&descriptions, ctx.format)
}

/// Run the thing create command
pub async fn create(
    opts: &GlobalOptions,
    name: &str,
    thing_type: Option<&str>,
    attributes: &[String],
) -> Result<()> {
    let mut request = CreateThingRequest::new(name);
    if let Some(thing_type) = thing_type {
        request = request.thing_type_name(thing_type);
    }
    for (key, value) in parse_attribute_args(attributes)? {
        request = request.attribute(key, value)?;
    }

    let ctx = CommandContext::new(opts).await?;
    let created = ctx.client.create_thing(&request).await?;

    println!(
        "{} Created thing {} ({})",
        "✓".green(),
        created.thing_name.bold(),
        created.thing_arn.as_deref().unwrap_or("-")
    );
    Ok(())
}

/// Run the thing update command
pub async fn update(
    opts: &GlobalOptions,
    name: &str,
    thing_type: Option<&str>,
    attributes: &[String],
    merge: bool,
    expected_version: Option<i64>,
) -> Result<()> {
    let mut request = UpdateThingRequest::new();
    if let Some(thing_type) = thing_type {
        request = request.thing_type_name(thing_type);
    }
    for (key, value) in parse_attribute_args(attributes)? {
        request = request.attribute(key, value)?;
    }
    if merge {
        request = request.merge(true);
    }
    if let Some(version) = expected_version {
        request = request.expected_version(version);
    }

    let ctx = CommandContext::new(opts).await?;
    ctx.client.update_thing(name, &request).await?;

    println!("{} Updated thing {}", "✓".green(), name.bold());
    Ok(())
}

/// Run the thing delete command
pub async fn delete(opts: &GlobalOptions, name: &str, yes: bool) -> Result<()> {
    if !yes {
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(format!("Delete thing '{}'?", name))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let ctx = CommandContext::new(opts).await?;
    ctx.client.delete_thing(name).await?;

    println!("{} Deleted thing {}", "✓".green(), name.bold());
    Ok(())
}

/// Run the thing principals command
pub async fn principals(opts: &GlobalOptions, name: &str) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let principals = ctx.client.list_thing_principals(name).await?;

    if principals.is_empty() {
        println!("No principals attached to {}.", name);
    } else {
        for principal in principals {
            println!("{}", principal);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attribute_args() {
        let pairs =
            parse_attribute_args(&["building=hq".to_string(), "floor=3".to_string()]).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("building".to_string(), "hq".to_string()),
                ("floor".to_string(), "3".to_string())
            ]
        );
    }

    #[test]
    fn test_parse_attribute_args_rejects_missing_equals() {
        let err = parse_attribute_args(&["building".to_string()]).unwrap_err();
        assert!(err.to_string().contains("name=value"));
    }
}
