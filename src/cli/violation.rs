//! Violation commands

use crate::cli::args::{EventFilterArgs, GlobalOptions, ViolationFilterArgs};
use crate::cli::{PaginationArgs, handlers};
use crate::client::models::{ActiveViolation, ViolationEvent};
use crate::client::{DetectApi, drain_pages};
use crate::error::Result;
use crate::models::{ViolationDisplay, ViolationEventDisplay};

/// Run the violation active command
pub async fn active(
    opts: &GlobalOptions,
    filters: &ViolationFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let api_filters = filters.to_params();

    handlers::run_list_command::<ActiveViolation, ViolationDisplay, _, _>(
        opts,
        pagination,
        "active violations",
        |client, params, limit| async move {
            drain_pages(limit, |token| {
                let client = client.clone();
                let filters = api_filters.clone();
                let mut params = params.clone();
                if let Some(token) = token {
                    params = params.next_token(token);
                }
                async move {
                    client
                        .list_active_violations(Some(&params), Some(&filters))
                        .await
                }
            })
            .await
        },
    )
    .await
}

/// Run the violation events command
pub async fn events(
    opts: &GlobalOptions,
    filters: &EventFilterArgs,
    pagination: &PaginationArgs,
) -> Result<()> {
    let api_filters = filters.to_params()?;

    handlers::run_list_command::<ViolationEvent, ViolationEventDisplay, _, _>(
        opts,
        pagination,
        "violation events",
        |client, params, limit| async move {
            drain_pages(limit, |token| {
                let client = client.clone();
                let filters = api_filters.clone();
                let mut params = params.clone();
                if let Some(token) = token {
                    params = params.next_token(token);
                }
                async move {
                    client
                        .list_violation_events(&filters, Some(&params))
                        .await
                }
            })
            .await
        },
    )
    .await
}
