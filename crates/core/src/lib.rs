pub mod job;
pub mod record;
pub mod text;

pub use job::ImageJob;
pub use record::{ExtractionResult, OcrFields, CSV_HEADER};
pub use text::clean_full_text;
