//! App Context

use std::{fmt, sync::Arc};

use sqlx::migrate::MigrateError;
use thiserror::Error;
use tracing::info;

use crate::{
    database::{self, Db},
    domain::carts::{CartsService, PgCartsService},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to apply database migrations")]
    Migrations(#[source] MigrateError),
}

/// Services shared by every request.
#[derive(Clone)]
pub struct AppContext {
    pub carts: Arc<dyn CartsService>,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    #[must_use]
    pub fn new(carts: Arc<dyn CartsService>) -> Self {
        Self { carts }
    }

    /// Build application context from a database URL, applying any pending
    /// migrations first.
    ///
    /// # Errors
    ///
    /// Returns an error when connecting to the database or migrating it fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrations)?;

        info!("database migrations applied");

        Ok(Self::new(Arc::new(PgCartsService::new(Db::new(pool)))))
    }
}
