use std::path::PathBuf;

use fbds_ocr::ExtractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocateError {
    #[error("Cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot open output file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV write failed: {0}")]
    Write(#[from] csv::Error),
    #[error("Flushing output failed: {0}")]
    Flush(#[from] std::io::Error),
}

/// Failure of a single job. Never aborts the batch.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("worker panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Discovery failed: {0}")]
    Locate(#[from] LocateError),
    #[error("Output failed: {0}")]
    Sink(#[from] SinkError),
}
