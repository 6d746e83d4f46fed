use crate::domain::model::Download;
use crate::domain::ports::DownloadTarget;
use crate::utils::error::{HelperError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Saves downloads into a local directory.
#[derive(Debug, Clone)]
pub struct LocalDownloads {
    base_path: PathBuf,
}

impl LocalDownloads {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.base_path.join(sanitize_filename(filename))
    }
}

#[async_trait]
impl DownloadTarget for LocalDownloads {
    async fn save(&self, download: &Download) -> Result<()> {
        if download.filename.trim().is_empty() {
            return Err(HelperError::DownloadError {
                message: "filename is empty".to_string(),
            });
        }

        tokio::fs::create_dir_all(&self.base_path).await?;
        let full_path = self.path_for(&download.filename);
        tokio::fs::write(&full_path, &download.data).await?;

        tracing::info!(
            "Saved {} ({} bytes, {}) to {}",
            download.filename,
            download.size(),
            download.mime_type,
            full_path.display()
        );
        Ok(())
    }
}

/// Keeps downloads in memory; used by tests and dry runs.
#[derive(Debug, Default)]
pub struct MemoryDownloads {
    saved: Mutex<Vec<Download>>,
    revoked: Mutex<Vec<String>>,
}

impl MemoryDownloads {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<Download> {
        self.saved.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn revoked(&self) -> Vec<String> {
        self.revoked.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl DownloadTarget for MemoryDownloads {
    async fn save(&self, download: &Download) -> Result<()> {
        self.saved
            .lock()
            .map_err(|_| HelperError::DownloadError {
                message: "download list lock poisoned".to_string(),
            })?
            .push(download.clone());
        Ok(())
    }

    async fn revoke(&self, object_url: &str) -> Result<()> {
        self.revoked
            .lock()
            .map_err(|_| HelperError::DownloadError {
                message: "download list lock poisoned".to_string(),
            })?
            .push(object_url.to_string());
        Ok(())
    }
}

/// 去除會造成路徑穿越的字元
fn sanitize_filename(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}
