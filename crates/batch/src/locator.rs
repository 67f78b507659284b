use std::fs;
use std::path::{Path, PathBuf};

use fbds_core::ImageJob;

use crate::error::LocateError;

/// Where map images live under each municipality and which files count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorLayout {
    pub maps_dir: String,
    /// Lowercase extensions without the dot.
    pub extensions: Vec<String>,
}

impl Default for LocatorLayout {
    fn default() -> Self {
        Self {
            maps_dir: "MAPAS".to_string(),
            extensions: vec!["jpg".to_string(), "jpeg".to_string()],
        }
    }
}

impl LocatorLayout {
    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| self.extensions.iter().any(|x| *x == e))
    }
}

/// Walk `root/<UF>/<municipality>/<maps_dir>/` and list every eligible image.
///
/// Every level is visited in sorted order, so the result is deterministic for
/// a given tree. Stray entries are skipped silently; only unreadable
/// directories are errors.
pub fn discover(root: &Path, layout: &LocatorLayout) -> Result<Vec<ImageJob>, LocateError> {
    let mut jobs = Vec::new();

    for region_dir in sorted_entries(root)? {
        let Some(region) = dir_name(&region_dir) else { continue };
        if !region_dir.is_dir() || !is_region_code(&region) {
            continue;
        }

        for city_dir in sorted_entries(&region_dir)? {
            let Some(city) = dir_name(&city_dir) else { continue };
            if !city_dir.is_dir() {
                continue;
            }

            let maps_dir = city_dir.join(&layout.maps_dir);
            if !maps_dir.is_dir() {
                continue;
            }

            for image in sorted_entries(&maps_dir)? {
                if image.is_file() && layout.accepts(&image) {
                    jobs.push(ImageJob::new(region.clone(), city.clone(), image));
                }
            }
        }
    }

    tracing::debug!(root = %root.display(), found = jobs.len(), "discovery finished");
    Ok(jobs)
}

/// Exactly two alphabetic characters, e.g. `SP`.
fn is_region_code(name: &str) -> bool {
    name.chars().count() == 2 && name.chars().all(char::is_alphabetic)
}

fn dir_name(path: &Path) -> Option<String> {
    path.file_name().and_then(|n| n.to_str()).map(str::to_string)
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>, LocateError> {
    let read_err = |source| LocateError::ReadDir { path: dir.to_path_buf(), source };
    let mut paths = fs::read_dir(dir)
        .map_err(read_err)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    paths.sort();
    Ok(paths)
}
