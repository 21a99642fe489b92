//! Waits for PDFs that NAV writes to a shared folder.
//!
//! NAV keeps the file locked while the report is rendered. A file that exists
//! but cannot be opened exclusively is still being generated; it is retried a
//! fixed number of times before giving up.

use std::{
    fs::{OpenOptions, TryLockError},
    io::{self, Read},
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::info;

use crate::{
    error::{NavError, NavResult},
    models::PdfArtifact,
    util::consts::{DEFAULT_POLL_DELAY_MILLIS, DEFAULT_POLL_RETRIES},
};

#[async_trait::async_trait]
pub trait IPdfService: Send + Sync {
    async fn get_pdf(&self, job_id: &str, company_name: &str) -> NavResult<PdfArtifact>;
}

#[derive(Debug, Clone)]
pub struct PdfPollSettings {
    pub root: PathBuf,
    pub retries: u32,
    pub delay: Duration,
}

impl PdfPollSettings {
    pub fn new(root: PathBuf) -> Self {
        PdfPollSettings {
            root,
            retries: DEFAULT_POLL_RETRIES,
            delay: Duration::from_millis(DEFAULT_POLL_DELAY_MILLIS),
        }
    }
}

pub struct PdfPoller {
    pub settings: PdfPollSettings,
}

pub fn pdf_file_name(job_id: &str) -> String {
    format!("{}.pdf", job_id)
}

/// Rejects anything that would not stay a single directory entry below the root.
fn path_segment<'a>(value: &'a str, field: &str) -> NavResult<&'a str> {
    if value.trim().is_empty() {
        return Err(NavError::InvalidInput(format!("{} is required", field)));
    }
    if value == "." || value == ".." || value.contains(['/', '\\', '\0']) {
        return Err(NavError::InvalidInput(format!("{} '{}' is not a valid file name", field, value)));
    }
    Ok(value)
}

impl PdfPoller {
    pub fn pdf_path(&self, job_id: &str, company_name: &str) -> NavResult<PathBuf> {
        let job_id = path_segment(job_id, "JobId")?;
        let company_name = path_segment(company_name, "CompanyName")?;
        Ok(self.settings.root.join(company_name).join(pdf_file_name(job_id)))
    }
}

#[async_trait::async_trait]
impl IPdfService for PdfPoller {
    #[tracing::instrument(skip(self))]
    async fn get_pdf(&self, job_id: &str, company_name: &str) -> NavResult<PdfArtifact> {
        let path = self.pdf_path(job_id, company_name)?;
        if !tokio::fs::try_exists(&path).await? {
            return Err(NavError::ArtifactNotFound(job_id.to_string()));
        }

        let attempts = self.settings.retries.max(1);
        for attempt in 1..=attempts {
            let read_path = path.clone();
            let content = tokio::task::spawn_blocking(move || read_exclusive(&read_path))
                .await
                .map_err(|err| NavError::Io(err.to_string()))?;
            match content {
                Ok(content) => {
                    info!("Read {} ({} KiB) on attempt {}", path.display(), content.len() / 1024, attempt);
                    return Ok(PdfArtifact {
                        job_id: job_id.to_string(),
                        company_name: company_name.to_string(),
                        file_name: pdf_file_name(job_id),
                        content,
                    });
                }
                Err(err) if is_locked(&err) => info!("PDF {} not ready on attempt {}/{}: {}", path.display(), attempt, attempts, err),
                Err(err) if err.kind() == io::ErrorKind::NotFound => return Err(NavError::ArtifactNotFound(job_id.to_string())),
                Err(err) => return Err(NavError::Io(format!("{}: {}", path.display(), err))),
            }
            if attempt < attempts {
                tokio::time::sleep(self.settings.delay).await;
            }
        }
        Err(NavError::ArtifactLocked(job_id.to_string()))
    }
}

/// Only contention is worth waiting for, anything else will not go away by retrying.
fn is_locked(err: &io::Error) -> bool {
    // ERROR_SHARING_VIOLATION, ERROR_LOCK_VIOLATION
    #[cfg(windows)]
    let shared = matches!(err.raw_os_error(), Some(32) | Some(33));
    #[cfg(not(windows))]
    let shared = false;
    shared || err.kind() == io::ErrorKind::WouldBlock
}

/// Reads the file only if no one else holds it. Windows refuses the open while
/// the writer has it; everywhere an exclusive lock is taken as well.
pub fn read_exclusive(path: &Path) -> io::Result<Vec<u8>> {
    let mut options = OpenOptions::new();
    options.read(true);
    #[cfg(windows)]
    {
        use std::os::windows::fs::OpenOptionsExt;
        options.share_mode(0);
    }
    let mut file = options.open(path)?;
    file.try_lock().map_err(|err| match err {
        TryLockError::WouldBlock => io::Error::new(io::ErrorKind::WouldBlock, "file is locked by another process"),
        TryLockError::Error(err) => err,
    })?;
    let mut content = Vec::new();
    file.read_to_end(&mut content)?;
    Ok(content)
}
