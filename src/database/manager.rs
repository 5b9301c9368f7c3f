use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Open the connection pool described by the configuration. The URL is
/// parsed up front so a malformed `DATABASE_URL` fails fast with a clear
/// error instead of surfacing as a connect timeout.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    let url = url::Url::parse(&config.url).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(url.as_str())
        .await?;

    info!("created database pool for: {}", url.path().trim_start_matches('/'));
    Ok(pool)
}

/// Pings the pool to ensure connectivity.
pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_malformed_url() {
        let config = DatabaseConfig {
            url: "not a url".to_string(),
            max_connections: 1,
            connect_timeout_secs: 1,
        };
        let err = connect(&config).await.unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidDatabaseUrl));
    }
}
