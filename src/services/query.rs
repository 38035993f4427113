//! Query Engine
//!
//! Generic keyword search, stable sort and pagination over an in-memory
//! snapshot of records. The input slice is never mutated.

use std::cmp::Ordering;

use thiserror::Error;
use tracing::debug;

use crate::types::{FieldValue, PageRequest, PageResult, Record, SortDirection, SortSpec};

/// Query engine errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Invalid parameter {field}: {value}")]
    InvalidParameter { field: &'static str, value: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

/// Page through `records` using the entity's own searchable fields.
pub fn query<T: Record>(records: &[T], request: &PageRequest) -> Result<PageResult<T>, QueryError> {
    query_fields(records, request, T::SEARCHABLE_FIELDS)
}

/// Page through `records`, matching the keyword against `searchable`.
pub fn query_fields<T: Record>(
    records: &[T],
    request: &PageRequest,
    searchable: &[&str],
) -> Result<PageResult<T>, QueryError> {
    if request.page < 1 {
        return Err(QueryError::InvalidParameter {
            field: "page",
            value: request.page.to_string(),
        });
    }
    if request.page_size < 1 {
        return Err(QueryError::InvalidParameter {
            field: "pageSize",
            value: request.page_size.to_string(),
        });
    }
    let page = request.page as usize;
    let page_size = request.page_size as usize;

    let mut matched: Vec<&T> = match request.effective_keyword() {
        Some(keyword) => {
            let keyword = keyword.to_lowercase();
            records
                .iter()
                .filter(|r| matches_keyword(*r, &keyword, searchable))
                .collect()
        }
        None => records.iter().collect(),
    };

    if let Some(ref sort) = request.sort {
        sort_records(&mut matched, sort);
    }

    let total = matched.len();
    let total_pages = total.div_ceil(page_size);

    let items: Vec<T> = match (page - 1).checked_mul(page_size) {
        Some(start) if start < total => {
            let end = start.saturating_add(page_size).min(total);
            matched[start..end].iter().map(|r| (*r).clone()).collect()
        }
        _ => Vec::new(),
    };

    debug!(
        "{} query page={} page_size={} matched={} returned={}",
        T::ENTITY,
        page,
        page_size,
        total,
        items.len()
    );

    Ok(PageResult {
        items,
        total,
        page,
        page_size,
        total_pages,
    })
}

/// Look up a record by its identity key.
pub fn find_by_id<T: Record>(records: &[T], id: &str) -> Result<T, QueryError> {
    records
        .iter()
        .find(|r| r.id() == id)
        .cloned()
        .ok_or_else(|| QueryError::NotFound {
            entity: T::ENTITY,
            id: id.to_string(),
        })
}

/// `keyword` must already be lowercased.
fn matches_keyword<T: Record>(record: &T, keyword: &str, searchable: &[&str]) -> bool {
    searchable.iter().any(|field| {
        record
            .field(field)
            .map(|value| value.search_text().contains(keyword))
            .unwrap_or(false)
    })
}

/// Stable sort by the named field. Records without the field go last.
fn sort_records<T: Record>(records: &mut Vec<&T>, sort: &SortSpec) {
    let mut keyed: Vec<(Option<FieldValue>, &T)> = records
        .drain(..)
        .map(|r| (r.field(&sort.field), r))
        .collect();

    // slice::sort_by is stable, so equal keys keep their input order
    keyed.sort_by(|(a, _), (b, _)| compare_keys(a.as_ref(), b.as_ref(), sort.direction));

    records.extend(keyed.into_iter().map(|(_, r)| r));
}

fn compare_keys(a: Option<&FieldValue>, b: Option<&FieldValue>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ord = a.compare(b);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
