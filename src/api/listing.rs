//! Query-string handling shared by the list endpoints.

use serde::Deserialize;

use crate::config::PageConfig;
use crate::error::Result;
use crate::services::{query, QueryError, RecordStore};
use crate::types::{PageRequest, PageResult, Record, SortDirection, SortSpec};

/// `?page=&pageSize=&keyword=&sortBy=&sortOrder=`
///
/// Numbers arrive as strings so malformed values are reported in the
/// response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub keyword: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
}

fn parse_int(field: &'static str, raw: &str) -> std::result::Result<i64, QueryError> {
    raw.trim().parse().map_err(|_| QueryError::InvalidParameter {
        field,
        value: raw.to_string(),
    })
}

impl ListQuery {
    /// Build a page request. Page sizes above the configured maximum are
    /// clamped; values below 1 are left for the query engine to reject.
    pub fn to_request(&self, paging: &PageConfig) -> std::result::Result<PageRequest, QueryError> {
        let page = match self.page.as_deref() {
            Some(raw) => parse_int("page", raw)?,
            None => 1,
        };
        let page_size = match self.page_size.as_deref() {
            Some(raw) => parse_int("pageSize", raw)?.min(paging.max_page_size),
            None => paging.default_page_size,
        };

        let mut request = PageRequest::new(page, page_size);
        if let Some(ref keyword) = self.keyword {
            request = request.with_keyword(keyword.as_str());
        }
        if let Some(field) = self.sort_by.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
            let direction = match self.sort_order.as_deref().map(str::trim) {
                None | Some("") | Some("asc") | Some("ascend") => SortDirection::Asc,
                Some("desc") | Some("descend") => SortDirection::Desc,
                Some(other) => {
                    return Err(QueryError::InvalidParameter {
                        field: "sortOrder",
                        value: other.to_string(),
                    })
                }
            };
            request = request.with_sort(SortSpec {
                field: field.to_string(),
                direction,
            });
        }
        Ok(request)
    }
}

/// Run a list query against a store snapshot.
pub fn list_page<T: Record>(
    store: &RecordStore<T>,
    params: &ListQuery,
    paging: &PageConfig,
) -> Result<PageResult<T>> {
    let request = params.to_request(paging)?;
    Ok(query(&store.snapshot(), &request)?)
}
