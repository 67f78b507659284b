use std::path::Path;
use std::process::Command;

use fbds_core::OcrFields;

use crate::source::{ExtractError, MetadataSource};

/// Delegates extraction to an external program.
///
/// The image path is appended as the last argument; the program must print
/// one JSON object (`raw_text`, `primary_field`, `secondary_field`) on stdout.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }

    /// Build from a whitespace-separated command line, e.g. `python3 fbds_ocr.py`.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn failure(&self, detail: impl Into<String>) -> ExtractError {
        ExtractError::Command { program: self.program.clone(), detail: detail.into() }
    }
}

impl MetadataSource for CommandSource {
    fn extract_metadata(&self, path: &Path) -> Result<OcrFields, ExtractError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
            .map_err(|e| self.failure(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.failure(format!("{} ({})", output.status, stderr.trim())));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(OcrFields::from_json(stdout.trim())?)
    }
}
