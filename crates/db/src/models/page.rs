//! Paginated list envelope.

use serde::Serialize;

/// One page of a scoped list query.
///
/// `count` is the total number of matching rows before `limit`/`offset`
/// were applied.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub count: i64,
    pub results: Vec<T>,
}

/// Pagination, ordering and search inputs shared by every list endpoint.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    /// Raw `?ordering=` value; validated against the resource's allow-list.
    pub ordering: Option<String>,
    /// Raw `?search=` value.
    pub search: Option<String>,
}
