use std::path::{Path, PathBuf};

use fbds_batch::BatchConfig;

/// Process configuration, read once from the environment at startup.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Download tree produced by the FBDS scraper
    pub download_root: PathBuf,
    /// CSV written in the working directory
    pub output_csv: PathBuf,
    /// Parallel extractions; `None` means one per CPU
    pub workers: Option<usize>,
    /// External extraction command, image path appended
    pub ocr_command: Option<String>,
    // --- tesseract backend ---
    pub tessdata: Option<String>,
    pub ocr_lang: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            download_root: PathBuf::from("downloads"),
            output_csv: PathBuf::from("fbds_mapas_ocr.csv"),
            workers: None,
            ocr_command: None,
            tessdata: None,
            ocr_lang: fbds_ocr::DEFAULT_LANG.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        Self {
            download_root: non_empty("DOWNLOAD_ROOT").map(PathBuf::from).unwrap_or(default.download_root),
            output_csv: non_empty("FBDS_OUTPUT_CSV").map(PathBuf::from).unwrap_or(default.output_csv),
            workers: non_empty("FBDS_WORKERS").and_then(|v| v.trim().parse().ok()).filter(|n| *n > 0),
            ocr_command: non_empty("FBDS_OCR_COMMAND"),
            tessdata: non_empty("TESSDATA_PREFIX"),
            ocr_lang: non_empty("FBDS_OCR_LANG").unwrap_or(default.ocr_lang),
        }
    }

    /// Resolve relative paths against `cwd` and build the batch settings.
    pub fn batch_config(&self, cwd: &Path) -> BatchConfig {
        let config = BatchConfig::new(cwd.join(&self.download_root), cwd.join(&self.output_csv));
        match self.workers {
            Some(n) => config.with_workers(n),
            None => config,
        }
    }
}
