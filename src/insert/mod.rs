mod builder;

pub use builder::InsertStatementBuilder;

use crate::core::{BindValue, Result};
use crate::json::MappedBatch;
use async_trait::async_trait;
use log::{info, warn};

/// Something that can run one parameterized statement.
///
/// Implemented by [`Database`](crate::connection::Database); tests plug in
/// recording fakes.
#[async_trait]
pub trait StatementExecutor: Send {
    /// Execute `sql` with `values` bound positionally. Returns affected rows.
    async fn execute(&mut self, sql: &str, values: &[BindValue]) -> Result<u64>;

    /// Release the underlying handle. Must be safe to call more than once.
    async fn close(&mut self) -> Result<()>;
}

/// Writes a [`MappedBatch`] to one table with a single statement.
#[derive(Debug, Clone)]
pub struct BulkInserter {
    table: String,
}

impl BulkInserter {
    pub fn new(table: impl Into<String>) -> Self {
        Self { table: table.into() }
    }

    /// Compose the INSERT statement for `batch` without executing it
    pub fn statement(&self, batch: &MappedBatch) -> Result<String> {
        InsertStatementBuilder::new(self.table.as_str())
            .columns(batch.columns())
            .placeholder_groups(batch.placeholder_groups())
            .build()
    }

    /// Insert every record of `batch`.
    ///
    /// An empty batch is a no-op: nothing is sent to the executor and `0`
    /// is returned.
    pub async fn insert<E>(&self, executor: &mut E, batch: &MappedBatch) -> Result<u64>
    where
        E: StatementExecutor + ?Sized,
    {
        let sql = self.statement(batch)?;

        if batch.is_empty() {
            warn!("No records to insert into {}, skipping", self.table);
            return Ok(0);
        }

        let affected = executor.execute(&sql, batch.values()).await?;
        info!(
            "Inserted {} of {} records into {}",
            affected,
            batch.record_count(),
            self.table
        );
        Ok(affected)
    }
}
