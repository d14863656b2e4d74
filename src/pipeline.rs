//! Load → map → insert, run once per process.

use crate::core::Result;
use crate::insert::{BulkInserter, StatementExecutor};
use crate::json::{FieldMapping, MappedBatch, map_records, read_file};
use log::{error, info};
use std::path::PathBuf;

/// One file to load into one table
#[derive(Debug, Clone)]
pub struct ImportJob {
    pub file: PathBuf,
    pub table: String,
    pub mapping: FieldMapping,
}

impl ImportJob {
    pub fn new(file: impl Into<PathBuf>, table: impl Into<String>, mapping: FieldMapping) -> Self {
        Self {
            file: file.into(),
            table: table.into(),
            mapping,
        }
    }
}

/// A mapped batch and the statement that would insert it
#[derive(Debug, Clone)]
pub struct PreparedImport {
    pub statement: String,
    pub batch: MappedBatch,
}

/// Read and map the job's file without touching the database
pub async fn prepare(job: &ImportJob) -> Result<PreparedImport> {
    let bytes = read_file(&job.file).await?;
    let batch = map_records(&bytes, &job.mapping)?;
    let statement = BulkInserter::new(job.table.as_str()).statement(&batch)?;

    info!(
        "Mapped {} records from {} ({})",
        batch.record_count(),
        job.file.display(),
        job.mapping
    );
    Ok(PreparedImport { statement, batch })
}

/// Import the job's file through an open executor.
///
/// Every record is validated before the executor sees anything, so a bad
/// record means no statement is executed at all.
pub async fn import_file<E>(executor: &mut E, job: &ImportJob) -> Result<u64>
where
    E: StatementExecutor + ?Sized,
{
    let prepared = prepare(job).await?;
    BulkInserter::new(job.table.as_str())
        .insert(executor, &prepared.batch)
        .await
}

/// Import the job's file and close the executor, on success and on failure.
pub async fn run<E>(mut executor: E, job: &ImportJob) -> Result<u64>
where
    E: StatementExecutor,
{
    let outcome = import_file(&mut executor, job).await;
    let closed = executor.close().await;

    if let (Err(_), Err(close_err)) = (&outcome, &closed) {
        error!("Failed to close connection after import error: {}", close_err);
    }

    let affected = outcome?;
    closed?;
    Ok(affected)
}
