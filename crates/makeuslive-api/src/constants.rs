//! API-level constants.

/// Versioned prefix for every API route.
pub const API_PREFIX: &str = "/api/v1";

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Hard cap on page size for list endpoints.
pub const MAX_PAGE_SIZE: i64 = 100;
