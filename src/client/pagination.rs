//! Pagination helpers for API requests
//!
//! The Sentra API paginates with an opaque cursor: each page carries a
//! `nextToken` that is passed back verbatim to fetch the following page.
//! Tokens expire server-side after a few minutes, so pages are drained
//! promptly and sequentially.

#![allow(dead_code)] // Page-assembly helpers are exercised by the mock client and tests

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Maximum page size supported by the Sentra API.
/// Using this as default minimizes API calls.
pub const MAX_PAGE_SIZE: usize = 250;

/// Pagination parameters for API requests.
///
/// Use the builder pattern to configure pagination options.
///
/// # Example
/// ```ignore
/// let params = PaginationParams::new()
///     .max_results(100)
///     .next_token("opaque-cursor");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaginationParams {
    /// Number of items per page (default: 250, max: 250)
    pub max_results: Option<usize>,
    /// Cursor returned by the previous page
    pub next_token: Option<String>,
}

impl PaginationParams {
    /// Create new pagination params with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size (items per page).
    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = Some(max_results);
        self
    }

    /// Set the page cursor.
    pub fn next_token(mut self, token: impl Into<String>) -> Self {
        self.next_token = Some(token.into());
        self
    }

    /// Convert to query string parameters.
    ///
    /// Always includes `maxResults` (defaulting to [`MAX_PAGE_SIZE`] to
    /// minimize API calls); `nextToken` only when continuing a walk.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        let size = self.max_results.unwrap_or(MAX_PAGE_SIZE);
        params.push(("maxResults", size.to_string()));

        if let Some(ref token) = self.next_token {
            params.push(("nextToken", token.clone()));
        }

        params
    }

    /// Check if any pagination parameters are set.
    pub fn is_empty(&self) -> bool {
        self.max_results.is_none() && self.next_token.is_none()
    }
}

/// One page of results plus the cursor for the next one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagedResponse<T> {
    /// The data items for this page
    pub items: Vec<T>,

    /// Cursor for the next page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl<T> PagedResponse<T> {
    /// Create a final page with no continuation.
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            next_token: None,
        }
    }

    /// Create a page that continues at the given cursor.
    pub fn with_token(items: Vec<T>, next_token: impl Into<String>) -> Self {
        Self {
            items,
            next_token: Some(next_token.into()),
        }
    }

    /// Check if there are more pages to fetch.
    pub fn has_next_page(&self) -> bool {
        self.next_token.is_some()
    }
}

/// Walk a cursor-paginated endpoint to exhaustion, collecting every item.
///
/// `fetch` receives the cursor for the page to load (`None` for the first)
/// and returns that page. A spinner keeps long walks visibly alive; it is a
/// no-op when stderr is not a terminal. `limit` stops the walk early once
/// enough items have accumulated, saving API calls on large collections.
pub async fn drain_pages<T, F, Fut>(limit: Option<usize>, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<PagedResponse<T>>>,
{
    let spinner = ProgressBar::new_spinner().with_style(
        ProgressStyle::with_template("{spinner} fetched {pos} items")
            .expect("static template is valid"),
    );

    let mut items = Vec::new();
    let mut token: Option<String> = None;

    loop {
        let page = fetch(token.take()).await?;
        items.extend(page.items);
        spinner.set_position(items.len() as u64);

        if let Some(limit) = limit
            && items.len() >= limit
        {
            items.truncate(limit);
            break;
        }

        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    spinner.finish_and_clear();
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_params_default() {
        let params = PaginationParams::new();
        assert!(params.is_empty());

        // Even with no params set, to_query_params includes default maxResults
        let query = params.to_query_params();
        assert_eq!(query.len(), 1);
        assert!(query.contains(&("maxResults", MAX_PAGE_SIZE.to_string())));
    }

    #[test]
    fn test_pagination_params_builder() {
        let params = PaginationParams::new().max_results(50).next_token("abc");

        assert!(!params.is_empty());
        let query = params.to_query_params();
        assert_eq!(query.len(), 2);
        assert!(query.contains(&("maxResults", "50".to_string())));
        assert!(query.contains(&("nextToken", "abc".to_string())));
    }

    #[test]
    fn test_paged_response_has_next_page() {
        let done: PagedResponse<String> = PagedResponse::new(vec!["a".to_string()]);
        assert!(!done.has_next_page());

        let more = PagedResponse::with_token(vec!["a".to_string()], "cursor");
        assert!(more.has_next_page());
    }

    #[tokio::test]
    async fn test_drain_pages_follows_tokens() {
        let pages = vec![
            PagedResponse::with_token(vec![1, 2], "t1"),
            PagedResponse::with_token(vec![3], "t2"),
            PagedResponse::new(vec![4]),
        ];
        let pages = std::sync::Mutex::new(pages.into_iter());

        let seen_tokens = std::sync::Mutex::new(Vec::new());
        let items = drain_pages(None, |token| {
            seen_tokens.lock().unwrap().push(token.clone());
            let page = pages.lock().unwrap().next().unwrap();
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3, 4]);
        assert_eq!(
            *seen_tokens.lock().unwrap(),
            vec![None, Some("t1".to_string()), Some("t2".to_string())]
        );
    }

    #[tokio::test]
    async fn test_drain_pages_stops_at_limit() {
        let pages = vec![
            PagedResponse::with_token(vec![1, 2, 3], "t1"),
            PagedResponse::new(vec![4, 5]),
        ];
        let pages = std::sync::Mutex::new(pages.into_iter());

        let items = drain_pages(Some(2), |_| {
            let page = pages.lock().unwrap().next().unwrap();
            async move { Ok(page) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2]);
        // second page never requested
        assert_eq!(pages.lock().unwrap().len(), 1);
    }
}
