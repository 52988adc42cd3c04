use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Please fill in all fields.")]
    MissingInput,

    #[error("Login failed: {0}")]
    Auth(String),

    #[error("Download failed: {0}")]
    Transfer(String),

    #[error("I/O error: {0}")]
    Io(String),
}
