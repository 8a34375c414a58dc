// ABOUTME: Error kinds raised by the session store.
// ABOUTME: Declines and missing sessions are informational; the rest abort the command.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    /// The user answered no to a confirmation prompt.
    #[error("{action} cancelled: {}", .path.display())]
    UserDeclined { action: &'static str, path: PathBuf },

    #[error("Session {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error(
        "Storage directory {} does not exist. Create it, point storage_directory elsewhere, \
         or set use_centralized_storage_location = false",
        .0.display()
    )]
    DirectoryCreationDeclined(PathBuf),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] glob::PatternError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SessionError {
    /// Whether this error only needs a message and leaves the command a no-op.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            SessionError::UserDeclined { .. } | SessionError::NotFound(_)
        )
    }
}
