use std::collections::HashSet;
use std::path::PathBuf;

use crate::api::{ApiError, MediaClient};
use crate::domain::{AppError, DownloadRequest};

/// Drives a single submission: make sure the destination exists, then log
/// in and fetch the requested profile through the media client.
#[derive(Clone)]
pub struct DownloadCoordinator<C> {
    client: C,
}

impl<C: MediaClient> DownloadCoordinator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Open the native folder picker. Returns None if the user cancels.
    pub async fn choose_directory(&self) -> Option<PathBuf> {
        rfd::AsyncFileDialog::new()
            .set_title("Select Download Directory")
            .pick_folder()
            .await
            .map(|handle| handle.path().to_path_buf())
    }

    /// The destination tree is created up front, before any network
    /// traffic, and is kept even when the download later fails.
    pub async fn run(&self, request: DownloadRequest) -> Result<PathBuf, AppError> {
        tokio::fs::create_dir_all(&request.destination)
            .await
            .map_err(|e| {
                AppError::Io(format!(
                    "Failed to create {}: {}",
                    request.destination.display(),
                    e
                ))
            })?;

        self.client
            .login(
                &request.credentials.username,
                &request.credentials.password,
            )
            .await
            .map_err(login_error)?;

        let targets = HashSet::from([request.target_profile.clone()]);
        let report = self
            .client
            .download_profiles(&targets, &request.destination, true)
            .await
            .map_err(|e| AppError::Transfer(e.to_string()))?;

        log::info!(
            "{}: {} file(s) downloaded to {}",
            request.target_profile,
            report.files_downloaded,
            request.destination.display()
        );
        Ok(request.destination)
    }
}

fn login_error(err: ApiError) -> AppError {
    match err {
        ApiError::LoginFailed(reason) => AppError::Auth(reason),
        err @ ApiError::CsrfExtraction => AppError::Auth(err.to_string()),
        other => AppError::Transfer(other.to_string()),
    }
}
