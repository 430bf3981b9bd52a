use crate::error::QueryError;
use crate::query::{ListQuery, SortKey};
use crate::record::Record;
use log::debug;
use serde::Serialize;

///
/// PageInfo
/// Pagination metadata returned alongside every page.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub total_count: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

///
/// QueryPage
/// One page of the filtered and ordered collection, borrowed from the input.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct QueryPage<'a> {
    pub records: Vec<&'a Record>,
    pub pagination: PageInfo,
}

impl QueryPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn ids(&self) -> Vec<u32> {
        self.records.iter().map(|r| r.id).collect()
    }
}

// Comparable projection of a record for one sort key.
#[derive(Debug, Eq, Ord, PartialEq, PartialOrd)]
enum SortValue {
    Text(String),
    Number(u32),
}

fn sort_value(record: &Record, key: SortKey) -> SortValue {
    match key {
        SortKey::Name => SortValue::Text(record.name.to_lowercase()),
        SortKey::Email => SortValue::Text(record.email_or_empty().to_lowercase()),
        SortKey::Id => SortValue::Number(record.id),
    }
}

fn matches_search(record: &Record, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    record.name.to_lowercase().contains(needle)
        || record
            .email
            .as_deref()
            .is_some_and(|email| email.to_lowercase().contains(needle))
        || record.id.to_string().contains(needle)
}

/// Evaluate a list query against an immutable record collection.
///
/// Filtering keeps records whose name, email or decimal id contains the
/// search term (case-insensitively) and whose status passes the filter.
/// Ordering is a stable ascending sort on the chosen key; a descending query
/// reverses that result so ties keep a well-defined order. The requested
/// page is then cut from the ordered sequence; pages past the end are empty.
///
/// # Errors
/// * `QueryError::InvalidArgument` if `page` or `page_size` is zero
///
/// # Examples
/// ```
/// use dashboard::engine::run_query;
/// use dashboard::query::ListQuery;
/// use dashboard::record::Record;
///
/// let records = vec![Record::new(1, "Bob"), Record::new(2, "amy")];
/// let page = run_query(&records, &ListQuery::default()).unwrap();
/// assert_eq!(page.ids(), vec![2, 1]);
/// ```
pub fn run_query<'a>(records: &'a [Record], query: &ListQuery) -> Result<QueryPage<'a>, QueryError> {
    if query.page == 0 {
        return Err(QueryError::invalid("page must be positive, got 0"));
    }
    if query.page_size == 0 {
        return Err(QueryError::invalid("page_size must be positive, got 0"));
    }

    let needle = query.search.to_lowercase();
    let mut matched: Vec<&Record> = records
        .iter()
        .filter(|r| matches_search(r, &needle) && query.status.admits(r.status()))
        .collect();

    // sort_by_cached_key keeps equal keys in input order
    matched.sort_by_cached_key(|r| sort_value(r, query.sort_by));
    if query.sort_order.is_desc() {
        matched.reverse();
    }

    let total_count = matched.len();
    let total_pages = total_count.div_ceil(query.page_size);
    let start = (query.page - 1).saturating_mul(query.page_size);

    let page: Vec<&Record> = matched
        .into_iter()
        .skip(start)
        .take(query.page_size)
        .collect();

    debug!(
        "list query matched {} of {} records, returning {} on page {}/{}",
        total_count,
        records.len(),
        page.len(),
        query.page,
        total_pages
    );

    Ok(QueryPage {
        records: page,
        pagination: PageInfo {
            total_count,
            total_pages,
            current_page: query.page,
        },
    })
}

/// Look up a single record by id.
pub fn find_record(records: &[Record], id: u32) -> Option<&Record> {
    records.iter().find(|r| r.id == id)
}

/// Parse a record id taken from a path segment such as `users/17`.
pub fn parse_record_id(value: &str) -> Result<u32, QueryError> {
    match value.trim().parse::<u32>() {
        Ok(0) => Err(QueryError::invalid("record id must be positive, got 0")),
        Ok(id) => Ok(id),
        Err(_) => Err(QueryError::invalid(format!(
            "record id must be a positive integer, got '{value}'"
        ))),
    }
}
