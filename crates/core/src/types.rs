/// Program-tree entities (programs, levels, activities, experts, accounts)
/// are keyed by UUID v4, generated application-side at insert time.
pub type DbId = uuid::Uuid;

/// Catalog and join rows (diseases, goals, repeat days, participation) are
/// keyed by PostgreSQL BIGSERIAL.
pub type RowId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
