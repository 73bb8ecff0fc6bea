//! Offset/limit pagination types for list endpoints.

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_LIST_LIMIT, DEFAULT_LIST_OFFSET};
use crate::errors::{AppError, AppResult};

/// Normalized list request handed to every repository `get_list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub offset: u64,
    pub limit: u64,
    /// Case-insensitive substring filter; `None` lists everything
    pub search: Option<String>,
}

impl ListParams {
    pub fn new(offset: u64, limit: u64, search: Option<String>) -> Self {
        let limit = if limit == 0 { DEFAULT_LIST_LIMIT } else { limit };
        let search = search.filter(|s| !s.trim().is_empty());
        Self {
            offset,
            limit,
            search,
        }
    }
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            offset: DEFAULT_LIST_OFFSET,
            limit: DEFAULT_LIST_LIMIT,
            search: None,
        }
    }
}

/// Raw query string of a list request, before validation.
#[derive(Debug, Default, Deserialize)]
pub struct ListQueryParams {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl ListQueryParams {
    /// Validate the raw values.
    ///
    /// Absent or empty values fall back to defaults, negative offsets clamp
    /// to zero and non-positive limits use the default page size. Anything
    /// that is not an integer is rejected.
    pub fn into_params(self) -> AppResult<ListParams> {
        let offset = parse_int(self.offset.as_deref(), "offset")?
            .map(|v| v.max(0) as u64)
            .unwrap_or(DEFAULT_LIST_OFFSET);
        let limit = parse_int(self.limit.as_deref(), "limit")?
            .filter(|v| *v > 0)
            .map(|v| v as u64)
            .unwrap_or(DEFAULT_LIST_LIMIT);

        Ok(ListParams::new(offset, limit, self.search))
    }
}

fn parse_int(raw: Option<&str>, field: &str) -> AppResult<Option<i64>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| AppError::validation(format!("invalid {}", field))),
    }
}

/// List response envelope: total matching rows plus the requested page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListResponse<T> {
    pub count: u64,
    pub items: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(count: u64, items: Vec<T>) -> Self {
        Self { count, items }
    }
}
