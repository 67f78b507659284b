use std::sync::Arc;

use fbds_core::{ExtractionResult, ImageJob};
use fbds_ocr::MetadataSource;

use crate::error::WorkerError;

/// What a single job produced.
#[derive(Debug)]
pub enum JobOutcome {
    Extracted(ExtractionResult),
    /// Extraction failed; the row keeps its labels with empty metadata.
    Degraded { job: ImageJob, row: ExtractionResult, error: WorkerError },
    /// The worker died; no row is written.
    Lost { job: ImageJob, error: WorkerError },
}

impl JobOutcome {
    pub fn row(&self) -> Option<&ExtractionResult> {
        match self {
            JobOutcome::Extracted(row) | JobOutcome::Degraded { row, .. } => Some(row),
            JobOutcome::Lost { .. } => None,
        }
    }
}

/// Stateless wrapper around a [`MetadataSource`]; cheap to clone into every task.
pub struct Worker<S: ?Sized> {
    source: Arc<S>,
}

impl<S: ?Sized> Clone for Worker<S> {
    fn clone(&self) -> Self {
        Self { source: Arc::clone(&self.source) }
    }
}

impl<S: MetadataSource + ?Sized> Worker<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    /// Run the extraction routine and normalize its output.
    pub fn process(&self, job: &ImageJob) -> Result<ExtractionResult, WorkerError> {
        let fields = self.source.extract_metadata(&job.path)?;
        Ok(ExtractionResult::from_fields(job, fields))
    }

    /// Like [`Worker::process`], but a failed extraction still yields a row.
    pub fn extract(&self, job: &ImageJob) -> JobOutcome {
        match self.process(job) {
            Ok(row) => JobOutcome::Extracted(row),
            Err(error) => JobOutcome::Degraded {
                job: job.clone(),
                row: ExtractionResult::empty(job),
                error,
            },
        }
    }
}
