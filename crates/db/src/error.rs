use vitaplan_core::error::CoreError;

/// Error type for composer workflows, which mix persistence failures with
/// domain failures (missing parents, ownership, enum validation).
///
/// Plain per-table repositories return `sqlx::Error` directly; only the
/// multi-table workflows need this distinction.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type DbResult<T> = Result<T, DbError>;
