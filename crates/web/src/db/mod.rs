//! Database operations for the dashboard `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `customers` - Customer records
//! - `products` - Product records (stock, price, optional image filename)
//! - `session` - Session storage (tower-sessions)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/web/migrations/` and run via:
//! ```bash
//! cargo run -p arif-motor-cli -- migrate
//! ```

pub mod customers;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use customers::CustomerRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Build an `ILIKE` pattern that matches `term` as a literal substring.
///
/// `%`, `_` and `\` in the term are escaped so they lose their wildcard
/// meaning.
#[must_use]
pub fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_plain() {
        assert_eq!(contains_pattern("santoso"), "%santoso%");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("50%"), "%50\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c\\d"), "%c\\\\d%");
    }

    #[test]
    fn test_contains_pattern_empty_matches_all() {
        assert_eq!(contains_pattern(""), "%%");
    }
}
