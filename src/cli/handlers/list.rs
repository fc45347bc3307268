//! Generic list command handler
//!
//! Provides a reusable pattern for list commands that follow the standard flow:
//! 1. Create command context
//! 2. Drain pages from the API
//! 3. Apply limit
//! 4. Convert to display type
//! 5. Print output

use std::sync::Arc;

use log::debug;
use serde::Serialize;
use tabled::Tabled;

use crate::cache::CachedSentraClient;
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, PaginationArgs};
use crate::client::{MAX_PAGE_SIZE, PaginationParams, SentraClient};
use crate::error::Result;
use crate::output;

/// Run a standard list command with the common fetch → limit → display → print
/// pattern. This eliminates boilerplate across list commands like thing, cert,
/// policy, and profile.
///
/// # Type Parameters
///
/// * `T` - The API model type returned by the fetcher (e.g., `ThingSummary`)
/// * `D` - The display type that implements `From<T>`, `Tabled`, and `Serialize`
/// * `Fut` - The future type returned by the fetcher
///
/// # Arguments
///
/// * `opts` - Global CLI options (format, region override, config path, etc.)
/// * `pagination` - Pagination arguments from CLI
/// * `resource_name` - Name for debug logging (e.g., "things")
/// * `fetcher` - Async function draining the data given (client, params, limit)
///
/// # Example
///
/// ```ignore
/// run_list_command::<ThingSummary, ThingDisplay, _, _>(
///     opts,
///     pagination,
///     "things",
///     |client, params, limit| async move {
///         drain_pages(limit, |token| { ... }).await
///     },
/// ).await
/// ```
pub async fn run_list_command<T, D, Fut, F>(
    opts: &GlobalOptions,
    pagination: &PaginationArgs,
    resource_name: &str,
    fetcher: F,
) -> Result<()>
where
    T: 'static,
    D: From<T> + Tabled + Serialize,
    Fut: Future<Output = Result<Vec<T>>>,
    F: FnOnce(Arc<CachedSentraClient<SentraClient>>, PaginationParams, Option<usize>) -> Fut,
{
    let ctx = CommandContext::new(opts).await?;

    debug!("Fetching {}", resource_name);

    // No explicit limit: fall back to the configured page size preference
    let mut params = pagination.to_params();
    if params.max_results.is_none() {
        params = params.max_results(ctx.config.preferences.page_size.min(MAX_PAGE_SIZE));
    }
    let items = fetcher(ctx.client.clone(), params, pagination.limit).await?;

    debug!("Fetched {} {}", items.len(), resource_name);

    // The fetcher already stops at the limit; this guards against a final
    // page pushing past it.
    let limited_items: Vec<T> = if let Some(limit) = pagination.limit {
        items.into_iter().take(limit).collect()
    } else {
        items
    };

    // Convert to display type and print
    let display_items: Vec<D> = limited_items.into_iter().map(D::from).collect();
    output::print(&display_items, ctx.format)?;

    Ok(())
}
