//! Classification of `sqlx` errors into [`StoreError`].

use crate::error::StoreError;

/// Name of the unique constraint on `links.alias` (see `migrations/`).
pub const LINKS_ALIAS_CONSTRAINT: &str = "links_alias_key";

/// Returns true if `e` is a unique violation on the alias constraint.
///
/// Other unique violations (a primary key clash, say) are not alias
/// collisions and must not be retried as such.
pub fn is_unique_violation_on_alias(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(LINKS_ALIAS_CONSTRAINT))
}

/// Maps a driver error onto the store contract.
pub fn classify(e: sqlx::Error) -> StoreError {
    if is_unique_violation_on_alias(&e) {
        return StoreError::DuplicateKey;
    }

    match e {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        other => StoreError::Unavailable(other.to_string()),
    }
}
