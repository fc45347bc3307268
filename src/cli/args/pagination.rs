//! Pagination argument types for CLI commands

use clap::Args;

use crate::client::PaginationParams;
use crate::client::pagination::MAX_PAGE_SIZE;

/// Shared pagination arguments for list commands.
///
/// Flatten this into any command that supports pagination:
/// ```ignore
/// List {
///     #[command(flatten)]
///     pagination: PaginationArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct PaginationArgs {
    /// Maximum results to return
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl PaginationArgs {
    /// Convert CLI args to API pagination params.
    ///
    /// The page size is the smaller of the requested limit and the API
    /// maximum, so small listings cost a single call.
    pub fn to_params(&self) -> PaginationParams {
        let mut params = PaginationParams::new();

        if let Some(limit) = self.limit {
            params = params.max_results(limit.min(MAX_PAGE_SIZE));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_params_caps_at_max_page_size() {
        let args = PaginationArgs { limit: Some(10_000) };
        assert_eq!(args.to_params().max_results, Some(MAX_PAGE_SIZE));

        let args = PaginationArgs { limit: Some(10) };
        assert_eq!(args.to_params().max_results, Some(10));

        let args = PaginationArgs { limit: None };
        assert!(args.to_params().max_results.is_none());
    }
}
