//! Database seeding command.
//!
//! Inserts a handful of demo customers and products so a fresh install has
//! something to show. Rows go through the same repositories the dashboard
//! uses; no image files are seeded.

use arif_motor_web::config::{AppConfig, ConfigError};
use arif_motor_web::db::{self, CustomerRepository, ProductRepository, RepositoryError};
use arif_motor_web::models::{CustomerDraft, ProductDraft};

/// Errors that can occur while seeding.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

fn demo_customers() -> Vec<CustomerDraft> {
    vec![
        CustomerDraft {
            name: "Budi Santoso".to_owned(),
            address: "Jl. Merdeka No. 12, Sleman".to_owned(),
            phone: "081234567890".to_owned(),
            gender: "Laki-laki".to_owned(),
        },
        CustomerDraft {
            name: "Siti Aminah".to_owned(),
            address: "Jl. Kaliurang Km 7, Yogyakarta".to_owned(),
            phone: "085612345678".to_owned(),
            gender: "Perempuan".to_owned(),
        },
    ]
}

fn demo_products() -> Vec<ProductDraft> {
    vec![
        ProductDraft {
            name: "Helm Racing".to_owned(),
            brand: "INK".to_owned(),
            product_type: "Full Face".to_owned(),
            stock: 10,
            price: 350_000,
        },
        ProductDraft {
            name: "Oli Mesin 1L".to_owned(),
            brand: "Yamalube".to_owned(),
            product_type: "Pelumas".to_owned(),
            stock: 24,
            price: 55_000,
        },
        ProductDraft {
            name: "Ban Tubeless 90/80".to_owned(),
            brand: "FDR".to_owned(),
            product_type: "Ban".to_owned(),
            stock: 8,
            price: 210_000,
        },
    ]
}

/// Insert the demo rows.
///
/// # Errors
///
/// Returns `SeedError` if configuration is missing or any insert fails.
pub async fn run() -> Result<(), SeedError> {
    let config = AppConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let customers = CustomerRepository::new(&pool);
    for draft in demo_customers() {
        let customer = customers.create(&draft, None).await?;
        tracing::info!(customer_id = %customer.id, name = %customer.name, "seeded customer");
    }

    let products = ProductRepository::new(&pool);
    for draft in demo_products() {
        let product = products.create(&draft, None).await?;
        tracing::info!(product_id = %product.id, name = %product.name, "seeded product");
    }

    tracing::info!("Seeding complete!");
    Ok(())
}
