use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// One image discovered under `<root>/<region>/<sublevel>/MAPAS/`.
///
/// Identity is the path; the labels are carried through to the output row
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageJob {
    /// Two-letter state code, e.g. `SP`.
    pub region: String,
    /// Municipality directory name, e.g. `Campinas`.
    pub sublevel: String,
    pub path: PathBuf,
}

impl ImageJob {
    pub fn new(region: impl Into<String>, sublevel: impl Into<String>, path: PathBuf) -> Self {
        Self { region: region.into(), sublevel: sublevel.into(), path }
    }
}

impl fmt::Display for ImageJob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.region, self.sublevel, self.path.display())
    }
}
