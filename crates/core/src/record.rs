use serde::{Deserialize, Serialize};

use crate::job::ImageJob;
use crate::text::clean_full_text;

/// Column names of the output table, in order.
pub const CSV_HEADER: [&str; 5] = ["ESTADO", "CIDADE", "ANO_BASE", "ANO_SIRGAS", "FULL"];

/// The mapping returned by a single-image extraction routine.
///
/// Every field may be missing. The legacy `ano` / `sirgas` keys are accepted
/// alongside `primary_field` / `secondary_field`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrFields {
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default, rename = "primary_field", alias = "ano")]
    pub primary: Option<String>,
    #[serde(default, rename = "secondary_field", alias = "sirgas")]
    pub secondary: Option<String>,
}

impl OcrFields {
    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

/// One output row. Built once per job and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(rename = "ESTADO")]
    pub region: String,
    #[serde(rename = "CIDADE")]
    pub sublevel: String,
    /// Base year of the map (`ANO_BASE`).
    #[serde(rename = "ANO_BASE")]
    pub primary_year: Option<String>,
    /// SIRGAS datum year (`ANO_SIRGAS`).
    #[serde(rename = "ANO_SIRGAS")]
    pub secondary_year: Option<String>,
    #[serde(rename = "FULL")]
    pub raw_text: String,
}

impl ExtractionResult {
    /// Normalize extracted fields into a row, copying labels from the job.
    pub fn from_fields(job: &ImageJob, fields: OcrFields) -> Self {
        let raw = fields.raw_text.unwrap_or_default();
        Self {
            region: job.region.clone(),
            sublevel: job.sublevel.clone(),
            primary_year: fields.primary,
            secondary_year: fields.secondary,
            raw_text: clean_full_text(&raw),
        }
    }

    /// Row recorded for a job whose extraction failed: labels only.
    pub fn empty(job: &ImageJob) -> Self {
        Self::from_fields(job, OcrFields::default())
    }
}
