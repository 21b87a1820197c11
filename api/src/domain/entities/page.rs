//! Pagination and ordering for list endpoints

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 25;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Column a listing is ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
}

impl std::str::FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortField::CreatedAt),
            "updatedAt" => Ok(SortField::UpdatedAt),
            _ => Err(format!("Unknown sort field: {}", s)),
        }
    }
}

/// Paging parameters shared by every list endpoint (`?page=2&total=10&asc=true`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u64>,
    pub total: Option<u64>,
    pub order: Option<String>,
    pub asc: Option<bool>,
}

impl ListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.total
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Rows to skip, capped at the largest offset Postgres accepts
    pub fn offset(&self) -> u64 {
        (self.page() - 1)
            .saturating_mul(self.limit())
            .min(i64::MAX as u64)
    }

    /// Unknown columns fall back to creation time
    pub fn sort_field(&self) -> SortField {
        self.order
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(SortField::CreatedAt)
    }

    /// Newest first unless `asc=true`
    pub fn ascending(&self) -> bool {
        self.asc.unwrap_or(false)
    }
}

/// One page of results plus the total match count
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub page: Option<u64>,
    pub show: u64,
    pub count: u64,
    pub rows: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(query: &ListQuery, rows: Vec<T>, count: u64) -> Self {
        if rows.is_empty() {
            return Self {
                page: None,
                show: 0,
                count,
                rows,
            };
        }

        Self {
            page: Some(query.page()),
            show: query.limit().min(count),
            count,
            rows,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            show: self.show,
            count: self.count,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}
