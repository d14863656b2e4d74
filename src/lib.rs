// ============================================================================
// jsonload Library
// ============================================================================

pub mod core;
pub mod connection;
pub mod json;
pub mod insert;
pub mod pipeline;

// Re-export main types for convenience
pub use crate::core::{BindValue, LoaderError, Result};
pub use crate::connection::{Database, config::{ConnectionConfig, Driver}};
pub use crate::insert::{BulkInserter, StatementExecutor};
pub use crate::json::{FieldMapping, MappedBatch};
pub use crate::pipeline::ImportJob;

// ============================================================================
// High-level API
// ============================================================================

/// Connect with `config`, import `job`, and close the connection.
///
/// # Examples
///
/// ```no_run
/// use jsonload::{ConnectionConfig, FieldMapping, ImportJob};
///
/// # async fn example() -> jsonload::Result<()> {
/// let config = ConnectionConfig::from_env()?;
/// let mapping = FieldMapping::new([("id", "id"), ("nama_agama", "name")])?;
/// let job = ImportJob::new("assets/example.json", "tb_agama", mapping);
///
/// let inserted = jsonload::load(&config, &job).await?;
/// println!("Inserted {} rows", inserted);
/// # Ok(())
/// # }
/// ```
pub async fn load(config: &ConnectionConfig, job: &ImportJob) -> Result<u64> {
    let db = Database::connect(config).await?;
    pipeline::run(db, job).await
}
