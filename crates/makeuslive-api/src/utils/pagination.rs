//! Pagination query parameters for list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListQuery {
    /// Page size (1-100, default 50)
    pub limit: Option<i64>,
    /// Rows to skip
    pub offset: Option<i64>,
}

impl ListQuery {
    /// Clamp to sane bounds.
    pub fn limit_offset(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply() {
        let q = ListQuery {
            limit: None,
            offset: None,
        };
        assert_eq!(q.limit_offset(), (DEFAULT_PAGE_SIZE, 0));
    }

    #[test]
    fn bounds_are_clamped() {
        let q = ListQuery {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(q.limit_offset(), (MAX_PAGE_SIZE, 0));
    }
}
