use std::{fmt, panic::Location, path::PathBuf, time::Duration};

/// The crate's error type.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Store(#[from] jammdb::Error),
    #[error("Timed out after {0:?} waiting for the store's file lock")]
    OpenTimeout(Duration),
    #[error("Client is not open")]
    NotOpen,
    #[error("Bucket not found: {bucket}")]
    BucketMissing { bucket: String },
    #[error("Transaction {stage} failed at {location}: {source}")]
    Transaction {
        stage: Stage,
        location: &'static Location<'static>,
        #[source]
        source: jammdb::Error,
    },
}

impl Error {
    /// Annotates a store error with the transaction stage and the caller's
    /// source location.
    #[track_caller]
    pub(crate) fn transaction(stage: Stage, source: jammdb::Error) -> Self {
        Error::Transaction {
            stage,
            location: Location::caller(),
            source,
        }
    }
}

/// The point in a transaction's life at which an infrastructure error
/// happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Begin,
    Commit,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Begin => f.write_str("begin"),
            Stage::Commit => f.write_str("commit"),
        }
    }
}

/// Returned by [`crate::Client::open`]: the path that was attempted and the
/// unmodified cause.
#[derive(thiserror::Error, Debug)]
#[error("Failed to open store at {}: {source}", .path.display())]
pub struct OpenError {
    pub path: PathBuf,
    #[source]
    pub source: Error,
}

impl OpenError {
    /// Whether the open gave up waiting for another holder of the file lock.
    pub fn is_timeout(&self) -> bool {
        matches!(self.source, Error::OpenTimeout(_))
    }
}
