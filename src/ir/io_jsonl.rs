//! Line-delimited JSON detection records.
//!
//! Each line holds one record, `{"image": "<relative path>", "detections": [...]}`.
//! This is the output format of the detection tool. Detections are kept as raw
//! JSON values because their shape depends on the model that produced them.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::model::Loaded;
use super::text;
use super::warning::{LoadWarning, WarningCode};
use crate::error::LabelmapError;

/// One image and the detections reported for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Image path relative to the dataset root.
    pub image: String,
    /// Raw detections, normally an array. Any JSON value is accepted and a
    /// missing field reads as `null`.
    #[serde(default)]
    pub detections: Value,
}

impl DetectionRecord {
    pub fn new(image: impl Into<String>, detections: Vec<Value>) -> Self {
        Self {
            image: image.into(),
            detections: Value::Array(detections),
        }
    }

    /// True when the model reported anything at all.
    ///
    /// `null`, `false`, `0`, `""`, `[]` and `{}` all count as nothing.
    pub fn has_detections(&self) -> bool {
        is_truthy(&self.detections)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Read every well-formed record from a JSONL file.
///
/// Malformed lines are skipped with a warning. When several lines name the
/// same image, the later record replaces the earlier one but keeps its
/// position.
pub fn read_detection_records(path: &Path) -> Result<Loaded<DetectionRecord>, LabelmapError> {
    let content = text::read_text(path)?;
    Ok(records_from_str(&content, path))
}

/// Parse JSONL text. `source` is only used in warnings.
pub fn records_from_str(content: &str, source: &Path) -> Loaded<DetectionRecord> {
    let mut loaded: Loaded<DetectionRecord> = Loaded::default();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (idx, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match serde_json::from_str::<DetectionRecord>(trimmed) {
            Ok(record) => match positions.get(&record.image) {
                Some(&pos) => loaded.items[pos] = record,
                None => {
                    positions.insert(record.image.clone(), loaded.items.len());
                    loaded.items.push(record);
                }
            },
            Err(err) => loaded.warnings.push(LoadWarning::at_line(
                source,
                idx + 1,
                WarningCode::MalformedRecord,
                format!("skipping malformed record: {err}"),
            )),
        }
    }

    loaded
}

/// Write records as compact JSON, one per line.
pub fn write_detection_records(
    path: &Path,
    records: &[DetectionRecord],
) -> Result<(), LabelmapError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record).map_err(|source| {
            LabelmapError::RecordWrite {
                path: path.to_path_buf(),
                source,
            }
        })?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Build a single record for `image_path` from a JSON array of detections.
///
/// The record is keyed by the image's file name only.
pub fn single_record(
    image_path: &Path,
    detections_json: &str,
) -> Result<DetectionRecord, LabelmapError> {
    let detections: Vec<Value> = serde_json::from_str(detections_json)
        .map_err(|source| LabelmapError::DetectionsJson { source })?;

    let name = image_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| image_path.to_string_lossy().into_owned());

    Ok(DetectionRecord::new(name, detections))
}
