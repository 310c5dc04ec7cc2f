use crate::models::search::{SearchRecord, SearchSnapshot};
use anyhow::Result;
use repositories::search::{SearchRepository, UpdateClock};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
    clock: Arc<UpdateClock>,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // An in-memory database lives only as long as its connection.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);
        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self {
            conn,
            clock: Arc::new(UpdateClock::default()),
        })
    }

    fn search_repo(&self) -> SearchRepository {
        SearchRepository::new(self.conn.clone(), Arc::clone(&self.clock))
    }

    pub async fn upsert_search(&self, snapshot: &SearchSnapshot) -> Result<SearchRecord> {
        self.search_repo().upsert(snapshot).await
    }

    pub async fn recent_searches(&self, limit: u64) -> Result<Vec<SearchRecord>> {
        self.search_repo().list_recent(limit).await
    }

    pub async fn get_search(&self, normalized_city: &str) -> Result<Option<SearchRecord>> {
        self.search_repo().get(normalized_city).await
    }

    pub async fn search_count(&self) -> Result<u64> {
        self.search_repo().count().await
    }
}
