//! Database access layer
//!
//! Thin sqlx wrappers. Functions that must take part in a caller-managed
//! transaction accept `&mut PgConnection`; standalone reads take the pool.

pub mod orders;
pub mod products;

/// Postgres `foreign_key_violation` (SQLSTATE 23503)
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == "23503")
}
