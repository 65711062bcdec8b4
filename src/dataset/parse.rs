use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::model::{BubbleRecord, Dataset};

#[derive(Clone, Debug, Deserialize)]
pub(super) struct RawBubble {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) value: f64,
    #[serde(default, rename = "isCenter")]
    pub(super) is_center: Option<bool>,
}

impl From<RawBubble> for BubbleRecord {
    fn from(raw: RawBubble) -> Self {
        Self {
            id: raw.id,
            label: raw.name,
            value: raw.value as f32,
            is_focal: raw.is_center.unwrap_or(false),
        }
    }
}

pub(super) fn parse_dataset(raw: &str) -> Result<Dataset> {
    let parsed: Value = serde_json::from_str(raw).context("invalid JSON in dataset")?;

    let entries = match &parsed {
        Value::Array(entries) => entries,
        Value::Object(object) => object
            .get("nodes")
            .and_then(Value::as_array)
            .ok_or_else(|| anyhow!("dataset object has no `nodes` array"))?,
        _ => return Err(anyhow!("unexpected JSON type for dataset; expected array or object")),
    };

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let raw = RawBubble::deserialize(entry)
            .with_context(|| format!("invalid bubble at index {index}"))?;
        records.push(BubbleRecord::from(raw));
    }

    Dataset::from_records(records).context("dataset failed validation")
}
