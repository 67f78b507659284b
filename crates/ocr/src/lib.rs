pub mod command;
pub mod extract;
pub mod pipeline;
pub mod preprocess;
pub mod recognizer;
pub mod source;

pub use command::CommandSource;
pub use extract::CaptionExtractor;
pub use pipeline::OcrPipeline;
pub use preprocess::{prepare_for_ocr_from_bytes, PreprocessError};
pub use recognizer::{FixedCaption, OcrBackend, OcrError, DEFAULT_LANG};
pub use source::{ExtractError, MetadataSource};

#[cfg(feature = "tesseract")]
pub use recognizer::tesseract_backend::TesseractRecognizer;
