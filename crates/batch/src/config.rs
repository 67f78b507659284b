use std::num::NonZeroUsize;
use std::path::PathBuf;

use crate::locator::LocatorLayout;

pub const DEFAULT_PROGRESS_INTERVAL: usize = 50;

/// Everything one batch run needs. Built once at the binary boundary.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Download tree root: `<root>/<UF>/<municipality>/MAPAS/*.jpg`.
    pub root: PathBuf,
    /// CSV destination; parent directories are created on demand.
    pub output: PathBuf,
    /// Number of extractions allowed to run at the same time.
    pub workers: NonZeroUsize,
    /// Emit a progress line every this many completions.
    pub progress_interval: NonZeroUsize,
    pub layout: LocatorLayout,
}

impl BatchConfig {
    pub fn new(root: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: output.into(),
            workers: default_workers(),
            progress_interval: NonZeroUsize::new(DEFAULT_PROGRESS_INTERVAL).unwrap_or(NonZeroUsize::MIN),
            layout: LocatorLayout::default(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN);
        self
    }

    pub fn with_progress_interval(mut self, every: usize) -> Self {
        self.progress_interval = NonZeroUsize::new(every).unwrap_or(NonZeroUsize::MIN);
        self
    }
}

/// Available CPU parallelism, never less than one.
pub fn default_workers() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}
