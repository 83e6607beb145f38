//! Pagination over Carbon Arc page responses.
//!
//! Paginated endpoints take `page` (1-indexed) and `size` query parameters
//! and answer with `{"data": [...], "pages": N, ...}`. [`Paginator`] walks
//! those pages one request at a time.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::table::Table;

/// Default page size for paginated endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Fetches one page of a paginated endpoint.
///
/// Implemented by the sub-domain clients for each iterable endpoint, and by
/// test doubles.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch page `page` (1-indexed).
    async fn fetch_page(&self, page: u32) -> Result<Value>;
}

/// Lazy, finite sequence of page responses.
///
/// Each call to [`Paginator::next_page`] performs at most one request. The
/// sequence ends when a fetch returns an empty response, when the current page
/// number exceeds the `pages` count of the latest response (checked before
/// the next request is sent), or after an error has been yielded. Once
/// exhausted it stays exhausted; build a new paginator to start over.
pub struct Paginator<F> {
    fetcher: F,
    page: u32,
    last_total: Option<u64>,
    exhausted: bool,
}

impl<F> std::fmt::Debug for Paginator<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paginator")
            .field("page", &self.page)
            .field("last_total", &self.last_total)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

impl<F: PageFetcher> Paginator<F> {
    /// Start at page 1.
    pub fn new(fetcher: F) -> Self {
        Self::starting_at(fetcher, 1)
    }

    /// Start at an arbitrary page.
    pub fn starting_at(fetcher: F, page: u32) -> Self {
        Self {
            fetcher,
            page: page.max(1),
            last_total: None,
            exhausted: false,
        }
    }

    /// Page number the next call will request.
    pub fn current_page(&self) -> u32 {
        self.page
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetch the next page, or `None` once the sequence is over.
    pub async fn next_page(&mut self) -> Option<Result<Value>> {
        if self.exhausted {
            return None;
        }
        if self.last_total.is_some_and(|total| u64::from(self.page) > total) {
            self.exhausted = true;
            return None;
        }

        let response = match self.fetcher.fetch_page(self.page).await {
            Ok(response) => response,
            Err(e) => {
                self.exhausted = true;
                return Some(Err(e));
            }
        };

        if is_empty_response(&response) {
            tracing::debug!(page = self.page, "empty page response, stopping");
            self.exhausted = true;
            return None;
        }

        let total_pages = total_pages(&response);
        self.last_total = Some(total_pages);
        if u64::from(self.page) > total_pages {
            tracing::debug!(page = self.page, total_pages, "past last page, stopping");
            self.exhausted = true;
            return None;
        }

        self.page += 1;
        Some(Ok(response))
    }

    /// Drain the remaining pages into a vector.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub async fn collect_all(mut self) -> Result<Vec<Value>> {
        let mut pages = Vec::new();
        while let Some(page) = self.next_page().await {
            pages.push(page?);
        }
        Ok(pages)
    }

    /// Convert each page with `flatten` as it is fetched.
    pub fn tables(self, flatten: fn(&Value) -> Result<Table>) -> TablePages<F> {
        TablePages {
            pages: self,
            flatten,
        }
    }
}

/// A [`Paginator`] whose pages are flattened into [`Table`]s.
#[derive(Debug)]
pub struct TablePages<F> {
    pages: Paginator<F>,
    flatten: fn(&Value) -> Result<Table>,
}

impl<F: PageFetcher> TablePages<F> {
    /// Fetch and flatten the next page.
    pub async fn next_table(&mut self) -> Option<Result<Table>> {
        let flatten = self.flatten;
        self.pages
            .next_page()
            .await
            .map(|page| page.and_then(|p| flatten(&p)))
    }

    /// Fetch every remaining page and concatenate the tables.
    ///
    /// # Errors
    ///
    /// Returns the first fetch or flatten error.
    pub async fn concat_all(mut self) -> Result<Table> {
        let mut tables = Vec::new();
        while let Some(table) = self.next_table().await {
            tables.push(table?);
        }
        Ok(Table::concat(tables))
    }

    pub fn is_exhausted(&self) -> bool {
        self.pages.is_exhausted()
    }
}

/// A falsy response: null, false, or an empty object, array or string.
fn is_empty_response(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Number(_) => false,
    }
}

/// The `pages` count of a response, 0 when absent or not a number.
fn total_pages(value: &Value) -> u64 {
    value.get("pages").and_then(Value::as_u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};

    use serde_json::json;

    use super::*;
    use crate::error::CarbonArcError;

    struct FixedPages {
        pages: u64,
        calls: Arc<Mutex<Vec<u32>>>,
    }

    #[async_trait]
    impl PageFetcher for FixedPages {
        async fn fetch_page(&self, page: u32) -> Result<Value> {
            self.calls.lock().unwrap().push(page);
            Ok(json!({ "pages": self.pages, "page": page, "data": [{ "n": page }] }))
        }
    }

    struct Responses {
        responses: Vec<Value>,
        calls: AtomicU32,
    }

    #[async_trait]
    impl PageFetcher for Responses {
        async fn fetch_page(&self, page: u32) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .responses
                .get(page as usize - 1)
                .cloned()
                .unwrap_or(Value::Null))
        }
    }

    struct Failing;

    #[async_trait]
    impl PageFetcher for Failing {
        async fn fetch_page(&self, _page: u32) -> Result<Value> {
            Err(CarbonArcError::from_status(500, "boom".into(), "boom".into(), None))
        }
    }

    #[tokio::test]
    async fn test_yields_each_page_then_stops() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut pager = Paginator::new(FixedPages {
            pages: 3,
            calls: calls.clone(),
        });

        let mut seen = Vec::new();
        while let Some(page) = pager.next_page().await {
            seen.push(page.unwrap()["page"].as_u64().unwrap());
        }

        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(*calls.lock().unwrap(), vec![1, 2, 3]);
        assert!(pager.is_exhausted());
        assert!(pager.next_page().await.is_none());
        assert_eq!(calls.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_first_response_yields_nothing() {
        for empty in [Value::Null, json!({}), json!([]), json!(false)] {
            let pager = Paginator::new(Responses {
                responses: vec![empty],
                calls: AtomicU32::new(0),
            });
            assert!(pager.collect_all().await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_missing_pages_field_stops() {
        let fetcher = Responses {
            responses: vec![json!({ "data": [1, 2, 3] })],
            calls: AtomicU32::new(0),
        };
        let pages = Paginator::new(fetcher).collect_all().await.unwrap();
        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn test_error_is_terminal() {
        let mut pager = Paginator::new(Failing);
        assert!(matches!(pager.next_page().await, Some(Err(_))));
        assert!(pager.next_page().await.is_none());
    }

    #[tokio::test]
    async fn test_tables_concatenate_pages() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let table = Paginator::new(FixedPages { pages: 2, calls })
            .tables(crate::table::flatten_dataframe)
            .concat_all()
            .await
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.columns(), ["n"]);
    }
}
