pub mod config;

use crate::core::{BindValue, LoaderError, Result};
use crate::insert::StatementExecutor;
use async_trait::async_trait;
use config::ConnectionConfig;
use log::{debug, info};
use sqlx::AnyConnection;
use sqlx::Connection as _;
use sqlx::any::Any;

/// Database connection handle
///
/// Wraps a single sqlx connection opened from a [`ConnectionConfig`].
/// The connection is released by [`close`](StatementExecutor::close);
/// dropping an unclosed handle drops the underlying connection with it.
pub struct Database {
    conn: Option<AnyConnection>,
    url: String,
}

impl Database {
    /// Open a connection
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        config.validate()?;
        sqlx::any::install_default_drivers();

        let url = config.redacted_url();
        debug!("Connecting to {}", url);

        let conn = AnyConnection::connect(&config.to_url())
            .await
            .map_err(LoaderError::Connection)?;

        info!("Connected to {}", url);
        Ok(Self { conn: Some(conn), url })
    }

    #[cfg(test)]
    pub(crate) fn is_active(&self) -> bool {
        self.conn.is_some()
    }

    fn active(&mut self) -> Result<&mut AnyConnection> {
        self.conn
            .as_mut()
            .ok_or(LoaderError::Connection(sqlx::Error::PoolClosed))
    }
}

#[async_trait]
impl StatementExecutor for Database {
    async fn execute(&mut self, sql: &str, values: &[BindValue]) -> Result<u64> {
        let conn = self.active()?;
        debug!("Executing with {} bound values: {}", values.len(), sql);

        let mut query = sqlx::query::<Any>(sql);
        for value in values {
            query = match value {
                BindValue::Null => query.bind(Option::<String>::None),
                BindValue::Bool(b) => query.bind(*b),
                BindValue::Int(i) => query.bind(*i),
                BindValue::Float(f) => query.bind(*f),
                BindValue::Text(s) => query.bind(s.as_str()),
            };
        }

        let result = query.execute(conn).await.map_err(LoaderError::Insert)?;
        Ok(result.rows_affected())
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().await.map_err(LoaderError::Connection)?;
            debug!("Closed connection to {}", self.url);
        }
        Ok(())
    }
}
