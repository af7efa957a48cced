//! Writing a discovered mapping to disk.
//!
//! JSON is the default: a single object from class id to label, in report
//! order. A `.yaml`/`.yml` path gets an Ultralytics-style `data.yaml`
//! `names:` block instead, so the result can be dropped into a YOLO dataset.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::LabelmapError;
use crate::ir::ClassId;

/// Ordered `class id -> label` pairs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelMap {
    pairs: Vec<(ClassId, String)>,
}

impl LabelMap {
    pub fn new(pairs: Vec<(ClassId, String)>) -> Self {
        Self { pairs }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ClassId, &str)> {
        self.pairs.iter().map(|(id, label)| (id, label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Render as a `data.yaml` style `names:` block.
    pub fn to_data_yaml(&self) -> String {
        let mut yaml = String::from("names:\n");
        for (class_id, label) in self.iter() {
            let key = match class_id.as_integer() {
                Some(id) => id.to_string(),
                None => yaml_single_quoted(class_id.as_str()),
            };
            yaml.push_str(&format!("  {}: {}\n", key, yaml_single_quoted(label)));
        }
        yaml
    }
}

// Serialized as a map so key order follows the report, not string order.
impl Serialize for LabelMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (class_id, label) in &self.pairs {
            map.serialize_entry(class_id.as_str(), label)?;
        }
        map.end()
    }
}

fn yaml_single_quoted(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}

/// Write `map` to `path`, creating parent directories as needed.
pub fn write_mapping(path: &Path, map: &LabelMap) -> Result<(), LabelmapError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        return fs::write(path, map.to_data_yaml()).map_err(LabelmapError::Io);
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, map).map_err(|source| {
        LabelmapError::MappingWrite {
            path: path.to_path_buf(),
            source,
        }
    })?;
    writer.flush()?;
    Ok(())
}
