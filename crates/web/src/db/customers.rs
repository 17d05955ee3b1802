//! Customer repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use arif_motor_core::{CustomerId, UserId};

use super::{RepositoryError, contains_pattern};
use crate::models::{Customer, CustomerDraft};

/// Internal row type for customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    name: String,
    address: String,
    phone: String,
    gender: String,
    owner_id: Option<i32>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: CustomerId::new(row.id),
            name: row.name,
            address: row.address,
            phone: row.phone,
            gender: row.gender,
            owner_id: row.owner_id.map(UserId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str = "id, name, address, phone, gender, owner_id, created_at, updated_at";

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List customers in insertion order, optionally filtered to rows where
    /// `name`, `address` or `phone` contains `search` case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Customer>, RepositoryError> {
        let rows = match search.filter(|s| !s.is_empty()) {
            Some(term) => {
                sqlx::query_as::<_, CustomerRow>(&format!(
                    "SELECT {COLUMNS} FROM customers \
                     WHERE name ILIKE $1 OR address ILIKE $1 OR phone ILIKE $1 \
                     ORDER BY id"
                ))
                .bind(contains_pattern(term))
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, CustomerRow>(&format!(
                    "SELECT {COLUMNS} FROM customers ORDER BY id"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    /// Get a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Customer::from))
    }

    /// Insert a new customer. The identifier is assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        draft: &CustomerDraft,
        owner_id: Option<UserId>,
    ) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "INSERT INTO customers (name, address, phone, gender, owner_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.address)
        .bind(&draft.phone)
        .bind(&draft.gender)
        .bind(owner_id.map(|id| id.as_i32()))
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Overwrite the mutable fields of an existing customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: CustomerId,
        draft: &CustomerDraft,
    ) -> Result<Customer, RepositoryError> {
        let row = sqlx::query_as::<_, CustomerRow>(&format!(
            "UPDATE customers \
             SET name = $1, address = $2, phone = $3, gender = $4, updated_at = now() \
             WHERE id = $5 \
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.address)
        .bind(&draft.phone)
        .bind(&draft.gender)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a customer by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
