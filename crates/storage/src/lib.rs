use sqlx::{PgPool, postgres::PgPoolOptions};

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;

use error::Result;

const MAX_CONNECTIONS: u32 = 10;

/// Shared Postgres pool; cheap to clone into request state.
#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Builds the pool without opening a connection until the first query.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
