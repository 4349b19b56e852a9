// src/services/result_store.rs

use std::{
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use tokio::sync::Mutex;

use crate::models::exam_result::ExamResult;

#[derive(Debug, thiserror::Error)]
pub enum ResultStoreError {
    #[error("cannot read results store {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("results store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("cannot encode results: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("cannot write results store {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Append-only log of exam results kept as a single JSON array on disk.
///
/// Appends are serialized by an in-process lock. The file is replaced through a
/// sibling temp file so readers never see a half-written document.
#[derive(Debug)]
pub struct ResultStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ResultStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every stored result, oldest first. A missing file reads as empty.
    pub async fn load(&self) -> Result<Vec<ExamResult>, ResultStoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(ResultStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_slice(&raw).map_err(|source| ResultStoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Appends `result` and returns the new number of stored results.
    ///
    /// A corrupt store is left as it is and the append fails.
    pub async fn append(&self, result: &ExamResult) -> Result<usize, ResultStoreError> {
        let _guard = self.write_lock.lock().await;

        let mut results = self.load().await?;
        results.push(result.clone());
        let body = serde_json::to_vec_pretty(&results)?;

        let tmp = self.temp_path();
        let write_err = |source: io::Error| ResultStoreError::Write {
            path: self.path.clone(),
            source,
        };
        tokio::fs::write(&tmp, body).await.map_err(write_err)?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_err(e));
        }

        Ok(results.len())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("exam_results.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
