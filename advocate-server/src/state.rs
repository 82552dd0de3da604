//! Shared router state and store selection.

use std::sync::Arc;

use advocate_core::{AdvocateStore, FixtureStore, StoreKind};

use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AdvocateStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn AdvocateStore>) -> Self {
        Self { store }
    }

    /// State backed by the built-in fixture set.
    pub fn fixture() -> Self {
        Self::new(Arc::new(FixtureStore::default()))
    }

    pub fn kind(&self) -> StoreKind {
        self.store.kind()
    }

    /// Pick the store for `config`.
    ///
    /// Falls back to fixtures when no database is configured or the
    /// configured one cannot be reached.
    pub async fn connect(config: &ServerConfig) -> Self {
        let Some(url) = config.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL is not set - using fixture data");
            return Self::fixture();
        };
        Self::connect_database(url, config.max_connections).await
    }

    #[cfg(feature = "postgres")]
    async fn connect_database(url: &str, max_connections: u32) -> Self {
        use advocate_core::PgAdvocateStore;
        use sqlx::postgres::PgPoolOptions;

        let pool = match PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
        {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(error = %e, "failed to connect to database - using fixture data");
                return Self::fixture();
            }
        };

        let store = PgAdvocateStore::new(pool);
        if let Err(e) = store.ensure_schema().await {
            tracing::warn!(error = %e, "failed to prepare advocates table - using fixture data");
            return Self::fixture();
        }

        tracing::info!("Connected to database");
        Self::new(Arc::new(store))
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect_database(_url: &str, _max_connections: u32) -> Self {
        tracing::warn!("built without the `postgres` feature - ignoring DATABASE_URL");
        Self::fixture()
    }
}
