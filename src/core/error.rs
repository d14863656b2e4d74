use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("I/O error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Key '{field}' not found in JSON record {record_index}")]
    MissingField { field: String, record_index: usize },

    #[error("Insert error: {0}")]
    Insert(#[source] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, LoaderError>;

impl From<serde_json::Error> for LoaderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
