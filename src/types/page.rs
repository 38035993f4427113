//! Pagination Types
//!
//! Request and result shapes shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort by a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// A page of records to fetch.
///
/// `page` and `page_size` are signed so that out-of-range input reaches
/// validation instead of failing at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page,
            page_size,
            keyword: None,
            sort: None,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    /// The keyword to filter on, if any remains after trimming.
    pub fn effective_keyword(&self) -> Option<&str> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    /// Matching records before slicing
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl<T> PageResult<T> {
    /// Whether another page follows this one.
    pub fn has_more(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_keyword_trims() {
        let req = PageRequest::new(1, 10).with_keyword("  apple ");
        assert_eq!(req.effective_keyword(), Some("apple"));

        let blank = PageRequest::new(1, 10).with_keyword("   ");
        assert_eq!(blank.effective_keyword(), None);

        assert_eq!(PageRequest::default().effective_keyword(), None);
    }

    #[test]
    fn test_page_request_wire_names() {
        let req = PageRequest::new(2, 25).with_sort(SortSpec::desc("name"));
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["page"], 2);
        assert_eq!(json["pageSize"], 25);
        assert_eq!(json["sort"]["direction"], "desc");
        assert!(json.get("keyword").is_none());
    }

    #[test]
    fn test_has_more() {
        let result: PageResult<u32> = PageResult {
            items: vec![],
            total: 23,
            page: 2,
            page_size: 10,
            total_pages: 3,
        };
        assert!(result.has_more());
    }
}
