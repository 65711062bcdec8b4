use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::Dataset;
use super::parse::parse_dataset;

pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;

    let dataset =
        parse_dataset(&raw).with_context(|| format!("failed to parse dataset {}", path.display()))?;

    if dataset.is_empty() {
        log::warn!("{} contains no bubbles", path.display());
    }

    log::info!(
        "loaded {} bubbles from {} (focal: {})",
        dataset.len(),
        path.display(),
        dataset.focal_id().unwrap_or("none")
    );

    Ok(dataset)
}
