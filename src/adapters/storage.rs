use crate::domain::ports::Storage;
use crate::utils::error::{GeneQueryError, Result};
use std::io::ErrorKind;
use std::path::Path;

/// Reads input files from the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn read_to_string(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => GeneQueryError::FileNotFound {
                    path: path.to_path_buf(),
                },
                _ => GeneQueryError::FileRead {
                    path: path.to_path_buf(),
                    source,
                },
            })
    }
}
