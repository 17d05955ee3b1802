//! Product repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use arif_motor_core::ProductId;

use super::{RepositoryError, contains_pattern};
use crate::models::{Product, ProductDraft};

/// Internal row type for product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    brand: String,
    product_type: String,
    stock: i32,
    price: i64,
    image: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            brand: row.brand,
            product_type: row.product_type,
            stock: row.stock,
            price: row.price,
            image: row.image,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COLUMNS: &str =
    "id, name, brand, product_type, stock, price, image, created_at, updated_at";

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products in insertion order, optionally filtered to rows where
    /// `name`, `brand` or `product_type` contains `search` case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, search: Option<&str>) -> Result<Vec<Product>, RepositoryError> {
        let rows = match search.filter(|s| !s.is_empty()) {
            Some(term) => {
                sqlx::query_as::<_, ProductRow>(&format!(
                    "SELECT {COLUMNS} FROM products \
                     WHERE name ILIKE $1 OR brand ILIKE $1 OR product_type ILIKE $1 \
                     ORDER BY id"
                ))
                .bind(contains_pattern(term))
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ProductRow>(&format!(
                    "SELECT {COLUMNS} FROM products ORDER BY id"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Insert a new product, optionally with a stored image filename.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        draft: &ProductDraft,
        image: Option<&str>,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products (name, brand, product_type, stock, price, image) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.brand)
        .bind(&draft.product_type)
        .bind(draft.stock)
        .bind(draft.price)
        .bind(image)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Overwrite the mutable fields of an existing product.
    ///
    /// When `image` is `Some`, the stored filename is replaced; when `None`,
    /// the existing reference is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        draft: &ProductDraft,
        image: Option<&str>,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products \
             SET name = $1, brand = $2, product_type = $3, stock = $4, price = $5, \
                 image = COALESCE($6, image), updated_at = now() \
             WHERE id = $7 \
             RETURNING {COLUMNS}"
        ))
        .bind(&draft.name)
        .bind(&draft.brand)
        .bind(&draft.product_type)
        .bind(draft.stock)
        .bind(draft.price)
        .bind(image)
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a product by ID, returning the deleted row so the caller can
    /// release its image file.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "DELETE FROM products WHERE id = $1 RETURNING {COLUMNS}"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }
}
