use thiserror::Error;

/// Tesseract language for FBDS map legends, which are in Portuguese.
pub const DEFAULT_LANG: &str = "por";

#[derive(Debug, Error)]
pub enum OcrError {
    /// The engine refused the prepared PNG of a map scan.
    #[error("OCR engine could not load the map scan: {0}")]
    ScanRejected(String),
    /// Engine setup or recognition failed, e.g. missing traineddata.
    #[error("OCR engine failed: {0}")]
    Engine(String),
}

/// Turns the prepared PNG of a map scan into legend text.
pub trait OcrBackend: Send + Sync {
    fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError>;
}

/// Answers every scan with the same legend text. Lets the pipeline run
/// without an installed engine.
pub struct FixedCaption {
    pub caption: String,
}

impl FixedCaption {
    pub fn new(caption: impl Into<String>) -> Self {
        Self { caption: caption.into() }
    }
}

impl OcrBackend for FixedCaption {
    fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
        Ok(self.caption.clone())
    }
}

#[cfg(feature = "tesseract")]
pub mod tesseract_backend {
    use super::{OcrBackend, OcrError};
    use leptess::LepTess;

    /// A fresh engine is created per call, so one recognizer can be shared
    /// by every worker thread.
    pub struct TesseractRecognizer {
        data_path: Option<String>,
        lang: String,
    }

    impl TesseractRecognizer {
        pub fn new(data_path: Option<String>, lang: &str) -> Self {
            Self { data_path, lang: lang.to_string() }
        }
    }

    impl OcrBackend for TesseractRecognizer {
        fn recognize(&self, image_bytes: &[u8]) -> Result<String, OcrError> {
            let mut lt = LepTess::new(self.data_path.as_deref(), &self.lang)
                .map_err(|e| OcrError::Engine(e.to_string()))?;
            lt.set_image_from_mem(image_bytes)
                .map_err(|e| OcrError::ScanRejected(e.to_string()))?;
            lt.get_utf8_text().map_err(|e| OcrError::Engine(e.to_string()))
        }
    }
}
