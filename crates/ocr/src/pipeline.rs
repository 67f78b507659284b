use std::path::Path;

use fbds_core::OcrFields;

use crate::extract::CaptionExtractor;
use crate::preprocess;
use crate::recognizer::OcrBackend;
use crate::source::{ExtractError, MetadataSource};

/// Orchestrates: read → preprocess → OCR → caption extraction.
pub struct OcrPipeline<R: OcrBackend> {
    recognizer: R,
}

impl<R: OcrBackend> OcrPipeline<R> {
    pub fn new(recognizer: R) -> Self {
        Self { recognizer }
    }

    /// Process one map scan on disk.
    pub fn process_file(&self, path: &Path) -> Result<OcrFields, ExtractError> {
        let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.process_bytes(&bytes)
    }

    /// Process raw image bytes (JPEG / PNG).
    pub fn process_bytes(&self, data: &[u8]) -> Result<OcrFields, ExtractError> {
        let image_bytes = preprocess::prepare_for_ocr_from_bytes(data)?;
        let ocr_text = self.recognizer.recognize(&image_bytes)?;
        tracing::debug!(chars = ocr_text.len(), "recognized legend text");
        Ok(CaptionExtractor::extract(&ocr_text))
    }
}

impl<R: OcrBackend> MetadataSource for OcrPipeline<R> {
    fn extract_metadata(&self, path: &Path) -> Result<OcrFields, ExtractError> {
        self.process_file(path)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::{FixedCaption, OcrError};
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
    use std::io::Cursor;

    fn tiny_jpeg() -> Vec<u8> {
        let img: GrayImage = ImageBuffer::from_fn(4, 4, |x, _| Luma([(x * 60) as u8]));
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
            .unwrap();
        buf
    }

    struct BrokenEngine;

    impl OcrBackend for BrokenEngine {
        fn recognize(&self, _image_bytes: &[u8]) -> Result<String, OcrError> {
            Err(OcrError::Engine("no traineddata".into()))
        }
    }

    #[test]
    fn process_file_extracts_years() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.jpg");
        std::fs::write(&path, tiny_jpeg()).unwrap();

        let pipeline = OcrPipeline::new(FixedCaption::new("Ano Base: 2015\n\nDatum SIRGAS 2000"));
        let fields = pipeline.extract_metadata(&path).unwrap();

        assert_eq!(fields.primary.as_deref(), Some("2015"));
        assert_eq!(fields.secondary.as_deref(), Some("2000"));
        assert_eq!(fields.raw_text.as_deref(), Some("Ano Base: 2015\n\nDatum SIRGAS 2000"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = OcrPipeline::new(FixedCaption::new(""));
        let err = pipeline.extract_metadata(&dir.path().join("missing.jpg")).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    #[test]
    fn corrupt_image_is_preprocess_error() {
        let pipeline = OcrPipeline::new(FixedCaption::new(""));
        let err = pipeline.process_bytes(b"\xff\xd8 truncated").unwrap_err();
        assert!(matches!(err, ExtractError::Preprocess(_)));
    }

    #[test]
    fn engine_failure_is_reported() {
        let pipeline = OcrPipeline::new(BrokenEngine);
        let err = pipeline.process_bytes(&tiny_jpeg()).unwrap_err();
        assert!(matches!(err, ExtractError::Ocr(OcrError::Engine(_))));
    }
}
