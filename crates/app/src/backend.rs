use std::sync::Arc;

use anyhow::{Context, Result};
use fbds_ocr::{CommandSource, MetadataSource};

use crate::config::AppConfig;

/// Pick the extraction routine: an external command when configured,
/// otherwise the built-in Tesseract pipeline if compiled in.
pub fn select(config: &AppConfig) -> Result<Arc<dyn MetadataSource>> {
    if let Some(line) = &config.ocr_command {
        let source = CommandSource::from_command_line(line)
            .with_context(|| format!("FBDS_OCR_COMMAND is not a command: {line:?}"))?;
        tracing::info!("Using external extraction command: {}", source.program());
        return Ok(Arc::new(source));
    }
    builtin(config)
}

#[cfg(feature = "tesseract")]
fn builtin(config: &AppConfig) -> Result<Arc<dyn MetadataSource>> {
    use fbds_ocr::{OcrPipeline, TesseractRecognizer};

    tracing::info!("Using Tesseract ({})", config.ocr_lang);
    let recognizer = TesseractRecognizer::new(config.tessdata.clone(), &config.ocr_lang);
    Ok(Arc::new(OcrPipeline::new(recognizer)))
}

#[cfg(not(feature = "tesseract"))]
fn builtin(_config: &AppConfig) -> Result<Arc<dyn MetadataSource>> {
    anyhow::bail!("no OCR backend: set FBDS_OCR_COMMAND or build with the `tesseract` feature")
}
