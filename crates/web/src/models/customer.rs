//! Customer entity.

use chrono::{DateTime, Utc};

use arif_motor_core::{CustomerId, UserId};

/// A customer row.
#[derive(Debug, Clone)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub gender: String,
    /// The actor that created the record; absent when creation happened
    /// without a session user.
    pub owner_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated field values for a customer insert or update.
#[derive(Debug, Clone)]
pub struct CustomerDraft {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub gender: String,
}
