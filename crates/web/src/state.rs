//! Application state shared across handlers.

use std::io;
use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::services::ImageStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the database pool and the image store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    pool: PgPool,
    images: ImageStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the image directory cannot be created.
    pub fn new(config: AppConfig, pool: PgPool) -> io::Result<Self> {
        let images = ImageStore::open(&config.image_dir)?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                images,
            }),
        })
    }

    /// Get a reference to the application configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the product image store.
    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.inner.images
    }
}
