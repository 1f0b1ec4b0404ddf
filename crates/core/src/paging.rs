use serde::{Deserialize, Serialize};

/// Default page size when the client sends none (or a non-positive value).
const DEFAULT_LIMIT: i64 = 10;

/// Offset/limit paging parameters, deserialized from query strings.
///
/// `normalize` clamps out-of-range input instead of rejecting it; list
/// endpoints echo the struct back with `total` filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub page: i64,
    #[serde(default)]
    pub limit: i64,
    #[serde(skip_deserializing)]
    pub total: i64,
}

impl Default for Paging {
    fn default() -> Self {
        Self { page: 1, limit: DEFAULT_LIMIT, total: 0 }
    }
}

impl Paging {
    /// Clamp page to >= 1 and limit to >= 1 (defaulting to 10).
    pub fn normalize(&mut self) {
        if self.page < 1 {
            self.page = 1;
        }
        if self.limit < 1 {
            self.limit = DEFAULT_LIMIT;
        }
    }

    /// SQL OFFSET for the current page.
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}
