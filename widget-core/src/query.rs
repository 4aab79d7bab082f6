//! Catalog query engine.
//!
//! Search, tag filter, sort, then paginate. Pure functions over a widget
//! slice: the HTTP route and in-process callers get identical results for
//! identical parameters.

use serde::Serialize;
use thiserror::Error;
use widget_common::{BrowseFilters, SortOrder};

use crate::catalog::Widget;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("widget not found: {0}")]
    NotFound(String),
    #[error("invalid value for '{name}': {value:?}")]
    InvalidParameter { name: &'static str, value: String },
}

/// What to match and which page to return.
///
/// There is no default page size; every caller states its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    /// Case-insensitive substring of title or description. Empty matches all.
    pub search: String,
    /// A widget matches when it has at least one of these. Empty matches all.
    pub tags: Vec<String>,
    pub sort: SortOrder,
    /// 1-based
    pub page: usize,
    pub page_size: usize,
}

impl QueryParams {
    pub fn new(page_size: usize) -> Self {
        Self {
            search: String::new(),
            tags: Vec::new(),
            sort: SortOrder::default(),
            page: 1,
            page_size,
        }
    }

    pub fn from_filters(filters: &BrowseFilters, page_size: usize) -> Self {
        Self {
            search: filters.search.clone(),
            tags: filters.tags.clone(),
            sort: filters.sort,
            page: filters.page,
            page_size,
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}

/// One page of matches plus the match count before pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    pub widgets: Vec<Widget>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl QueryResult {
    /// Number of pages needed for `total` matches. Zero when there is
    /// nothing to show or the page size is zero.
    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }
}

fn matches_search(widget: &Widget, needle: &str) -> bool {
    widget.title.to_lowercase().contains(needle)
        || widget.description.to_lowercase().contains(needle)
}

fn matches_tags(widget: &Widget, tags: &[String]) -> bool {
    tags.iter().any(|tag| widget.tags.contains(tag))
}

/// Run a query against `widgets` in catalog order.
pub fn query(widgets: &[Widget], params: &QueryParams) -> QueryResult {
    let needle = params.search.to_lowercase();

    let mut matched: Vec<&Widget> = widgets
        .iter()
        .filter(|w| needle.is_empty() || matches_search(w, &needle))
        .filter(|w| params.tags.is_empty() || matches_tags(w, &params.tags))
        .collect();

    match params.sort {
        SortOrder::Popular => {}
        // sort_by is stable, so equal ratings keep catalog order
        SortOrder::Rating => matched.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortOrder::Recent => matched.reverse(),
    }

    let total = matched.len();
    let start = params
        .page
        .max(1)
        .saturating_sub(1)
        .saturating_mul(params.page_size);

    let page_widgets = matched
        .into_iter()
        .skip(start)
        .take(params.page_size)
        .cloned()
        .collect();

    QueryResult {
        widgets: page_widgets,
        total,
        page: params.page,
        page_size: params.page_size,
    }
}

/// Exact id lookup.
pub fn find_by_id<'a>(widgets: &'a [Widget], id: &str) -> Result<&'a Widget, QueryError> {
    widgets
        .iter()
        .find(|w| w.id == id)
        .ok_or_else(|| QueryError::NotFound(id.to_string()))
}
