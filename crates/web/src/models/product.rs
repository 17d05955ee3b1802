//! Product entity.

use chrono::{DateTime, Utc};

use arif_motor_core::ProductId;

/// A product row.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    /// Product category ("Full Face", "Oli Mesin", ...). The HTML form field
    /// is named `type`; the column avoids the reserved word.
    pub product_type: String,
    pub stock: i32,
    /// Price in whole rupiah.
    pub price: i64,
    /// Stored filename of the uploaded image, served from the image
    /// directory. Null when no image was uploaded.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated field values for a product insert or update.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub brand: String,
    pub product_type: String,
    pub stock: i32,
    pub price: i64,
}
