use reqwest::Error as ReqwestError;
use thiserror::Error;
use zip::result::ZipError;

/// Alias used by every fallible function of the crate.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// Error type for datasets
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Credentials are missing, unreadable, or were refused by the remote.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// The identifier does not resolve to a dataset on the remote.
    #[error("dataset not found: {0}")]
    NotFound(String),

    /// Error in the request
    #[error("request error: {0}")]
    Request(#[from] ReqwestError),

    /// The remote answered with an unexpected status.
    #[error("unexpected response for {id}: {status}")]
    Status {
        /// Identifier of the dataset being requested.
        id: String,
        /// The HTTP status returned.
        status: reqwest::StatusCode,
    },

    /// The destination could not be created or written.
    #[error("I/O error: {0}")]
    Filesystem(#[from] std::io::Error),

    /// The downloaded archive could not be unpacked.
    #[error("archive error: {0}")]
    Archive(#[source] ZipError),
}

impl From<ZipError> for DatasetError {
    fn from(err: ZipError) -> Self {
        match err {
            // Disk failures while unpacking are about the destination, not the archive.
            ZipError::Io(err) => DatasetError::Filesystem(err),
            err => DatasetError::Archive(err),
        }
    }
}

/// Flat classification of [`DatasetError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`DatasetError::Authentication`].
    Authentication,
    /// See [`DatasetError::NotFound`].
    NotFound,
    /// Transport failures and unexpected statuses.
    Network,
    /// See [`DatasetError::Filesystem`].
    Filesystem,
    /// See [`DatasetError::Archive`].
    Archive,
}

impl DatasetError {
    /// Which class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DatasetError::Authentication(_) => ErrorKind::Authentication,
            DatasetError::NotFound(_) => ErrorKind::NotFound,
            DatasetError::Request(_) | DatasetError::Status { .. } => ErrorKind::Network,
            DatasetError::Filesystem(_) => ErrorKind::Filesystem,
            DatasetError::Archive(_) => ErrorKind::Archive,
        }
    }
}
