pub mod config;
pub mod coordinator;
pub mod error;
pub mod locator;
pub mod progress;
pub mod sink;
pub mod worker;

pub use config::BatchConfig;
pub use coordinator::{run, BatchRun, Coordinator, RunState, RunSummary};
pub use error::{BatchError, LocateError, SinkError, WorkerError};
pub use locator::{discover, LocatorLayout};
pub use progress::Progress;
pub use sink::CsvSink;
pub use worker::{JobOutcome, Worker};
