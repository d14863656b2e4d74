use crate::core::{LoaderError, Result};
use log::debug;
use std::path::Path;

/// Read the whole input file into memory.
pub async fn read_file(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await.map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_reads_whole_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[{"id":1}]"#).unwrap();

        let bytes = read_file(file.path()).await.unwrap();
        assert_eq!(bytes, br#"[{"id":1}]"#);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_file(dir.path().join("absent.json")).await.unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }
}
