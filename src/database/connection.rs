//! Conexión a PostgreSQL
//!
//! Este módulo maneja la creación del pool de conexiones y la ejecución
//! de migraciones al arranque.

use anyhow::Result;
use sqlx::PgPool;

use crate::config::database::DatabaseConfig;

/// Conexión compartida a la base de datos
pub struct DatabaseConnection {
    pool: PgPool,
}

impl DatabaseConnection {
    /// Crear la conexión a partir de una configuración explícita
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = config.create_pool().await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    /// Crear la conexión con la configuración por defecto (DATABASE_URL)
    pub async fn new_default() -> Result<Self> {
        Self::new(&DatabaseConfig::default()).await
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
