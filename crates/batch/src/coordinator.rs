use std::any::Any;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use fbds_core::ImageJob;
use fbds_ocr::MetadataSource;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::config::BatchConfig;
use crate::error::{BatchError, WorkerError};
use crate::locator;
use crate::progress::Progress;
use crate::sink::CsvSink;
use crate::worker::{JobOutcome, Worker};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Discovering,
    Running,
    Finalizing,
    Done,
    Failed,
}

/// Transient bookkeeping for one execution. Never persisted.
#[derive(Debug, Clone)]
pub struct BatchRun {
    pub state: RunState,
    pub total: usize,
    pub completed: usize,
    pub failed: usize,
    pub rows_written: usize,
    pub output: PathBuf,
}

impl BatchRun {
    fn new(output: PathBuf) -> Self {
        Self { state: RunState::Idle, total: 0, completed: 0, failed: 0, rows_written: 0, output }
    }

    fn enter(&mut self, next: RunState) {
        debug!(from = ?self.state, to = ?next, "batch state change");
        self.state = next;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Images discovered.
    pub total: usize,
    pub rows_written: usize,
    /// Jobs whose extraction failed (degraded rows plus lost rows).
    pub failed: usize,
    /// `None` when nothing was found and no file was created.
    pub output: Option<PathBuf>,
}

/// Owns the worker pool and the output sink for one batch.
pub struct Coordinator<S: ?Sized> {
    config: BatchConfig,
    worker: Worker<S>,
    run: BatchRun,
}

impl<S: MetadataSource + ?Sized + 'static> Coordinator<S> {
    pub fn new(config: BatchConfig, source: Arc<S>) -> Self {
        let run = BatchRun::new(config.output.clone());
        Self { config, worker: Worker::new(source), run }
    }

    pub fn state(&self) -> RunState {
        self.run.state
    }

    pub fn batch_run(&self) -> &BatchRun {
        &self.run
    }

    /// Discover, extract in parallel, and write the CSV.
    pub async fn run(&mut self) -> Result<RunSummary, BatchError> {
        self.run.enter(RunState::Discovering);
        let jobs = match locator::discover(&self.config.root, &self.config.layout) {
            Ok(jobs) => jobs,
            Err(e) => {
                self.run.enter(RunState::Failed);
                return Err(e.into());
            }
        };
        self.execute(jobs).await
    }

    /// Run an already materialized job list.
    pub async fn execute(&mut self, jobs: Vec<ImageJob>) -> Result<RunSummary, BatchError> {
        self.run.total = jobs.len();
        if jobs.is_empty() {
            info!("No MAPAS JPGs found. Nothing to do.");
            self.run.enter(RunState::Done);
            return Ok(self.summary(None));
        }

        info!(
            "Found {} images. Using {} workers for OCR.",
            self.run.total, self.config.workers
        );

        self.run.enter(RunState::Running);
        let sink = match CsvSink::create(&self.config.output) {
            Ok(sink) => sink,
            Err(e) => {
                self.run.enter(RunState::Failed);
                return Err(e.into());
            }
        };

        match self.drain(jobs, sink).await {
            Ok(rows) => {
                self.run.rows_written = rows;
                self.run.enter(RunState::Done);
                info!("Done. Wrote {} rows to {}", rows, self.config.output.display());
                Ok(self.summary(Some(self.config.output.clone())))
            }
            Err(e) => {
                self.run.enter(RunState::Failed);
                error!("Batch aborted: {e}");
                Err(e)
            }
        }
    }

    async fn drain<W: Write>(
        &mut self,
        jobs: Vec<ImageJob>,
        mut sink: CsvSink<W>,
    ) -> Result<usize, BatchError> {
        let mut tasks = self.submit_all(jobs);
        let mut progress = Progress::new(self.run.total, self.config.progress_interval);

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    self.report(&outcome);
                    if let Some(row) = outcome.row() {
                        sink.write(row)?;
                    }
                }
                Err(e) => {
                    self.run.failed += 1;
                    error!("Extraction task vanished: {e}");
                }
            }

            self.run.completed += 1;
            if progress.tick() {
                info!("Processed {}/{} images...", progress.done(), progress.total());
            }
        }

        self.run.enter(RunState::Finalizing);
        let (rows, _) = sink.finish()?;
        Ok(rows)
    }

    /// Queue every job at once; the semaphore keeps at most `workers`
    /// extractions on the blocking pool.
    fn submit_all(&self, jobs: Vec<ImageJob>) -> JoinSet<JobOutcome> {
        let permits = Arc::new(Semaphore::new(self.config.workers.get()));
        let mut tasks = JoinSet::new();

        for job in jobs {
            let worker = self.worker.clone();
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.ok();
                let input = job.clone();
                match tokio::task::spawn_blocking(move || worker.extract(&input)).await {
                    Ok(outcome) => outcome,
                    Err(e) => JobOutcome::Lost { job, error: WorkerError::Panicked(panic_message(e)) },
                }
            });
        }
        tasks
    }

    fn report(&mut self, outcome: &JobOutcome) {
        match outcome {
            JobOutcome::Extracted(row) => {
                debug!(region = %row.region, city = %row.sublevel, "extracted");
            }
            JobOutcome::Degraded { job, error, .. } => {
                self.run.failed += 1;
                warn!("Extraction failed for {}: {error}; writing row with empty fields", job.path.display());
            }
            JobOutcome::Lost { job, error } => {
                self.run.failed += 1;
                error!("Worker crashed on {}: {error}; row omitted", job.path.display());
            }
        }
    }

    fn summary(&self, output: Option<PathBuf>) -> RunSummary {
        RunSummary {
            total: self.run.total,
            rows_written: self.run.rows_written,
            failed: self.run.failed,
            output,
        }
    }
}

/// Convenience wrapper: build a coordinator and run it once.
pub async fn run<S: MetadataSource + ?Sized + 'static>(
    config: BatchConfig,
    source: Arc<S>,
) -> Result<RunSummary, BatchError> {
    Coordinator::new(config, source).run().await
}

fn panic_message(e: JoinError) -> String {
    match e.try_into_panic() {
        Ok(payload) => payload_text(payload.as_ref()),
        Err(e) => e.to_string(),
    }
}

fn payload_text(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
