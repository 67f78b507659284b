use std::path::{Path, PathBuf};
use std::sync::Arc;

use fbds_core::OcrFields;
use thiserror::Error;

use crate::preprocess::PreprocessError;
use crate::recognizer::OcrError;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Image preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),
    #[error("OCR recognition failed: {0}")]
    Ocr(#[from] OcrError),
    #[error("Extraction command `{program}` failed: {detail}")]
    Command { program: String, detail: String },
    #[error("Extraction command produced invalid JSON: {0}")]
    InvalidOutput(#[from] serde_json::Error),
}

/// A single-image metadata extraction routine.
///
/// Called concurrently from several worker threads; implementations must not
/// rely on shared mutable state.
pub trait MetadataSource: Send + Sync {
    fn extract_metadata(&self, path: &Path) -> Result<OcrFields, ExtractError>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for Arc<S> {
    fn extract_metadata(&self, path: &Path) -> Result<OcrFields, ExtractError> {
        (**self).extract_metadata(path)
    }
}

impl<S: MetadataSource + ?Sized> MetadataSource for Box<S> {
    fn extract_metadata(&self, path: &Path) -> Result<OcrFields, ExtractError> {
        (**self).extract_metadata(path)
    }
}
