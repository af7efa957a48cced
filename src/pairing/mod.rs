//! Pairing annotation files across two directory trees.
//!
//! Each tree is scanned for files ending in a format-specific suffix. The
//! suffix is stripped to get a *base key*, and samples are the keys present
//! in both trees.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::LabelmapError;
use crate::ir::{LoadWarning, WarningCode};

/// Extensions recognized when indexing an image tree.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "png", "jpeg", "bmp", "webp"];

/// Files found under one root, keyed by base name.
#[derive(Clone, Debug, Default)]
pub struct CollectedFiles {
    /// Base key to the first file that produced it.
    pub files: BTreeMap<String, PathBuf>,
    /// Duplicate base keys and entries the walk could not read.
    pub warnings: Vec<LoadWarning>,
}

impl CollectedFiles {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&PathBuf> {
        self.files.get(key)
    }
}

/// Recursively collect files under `root` whose name ends with `suffix`.
///
/// The base key is the file name with `suffix` removed; an empty suffix keeps
/// the whole name. Traversal is sorted, so "first occurrence" is
/// deterministic.
pub fn collect_label_files(root: &Path, suffix: &str) -> Result<CollectedFiles, LabelmapError> {
    let mut collected = CollectedFiles::default();

    for (name, path) in walk_files(root, &mut collected.warnings)? {
        let Some(base) = name.strip_suffix(suffix) else {
            continue;
        };

        if let Some(first) = collected.files.get(base) {
            collected.warnings.push(LoadWarning::for_file(
                &path,
                WarningCode::DuplicateBaseName,
                format!(
                    "duplicate base name '{base}' detected; keeping first occurrence at {}",
                    first.display()
                ),
            ));
            continue;
        }

        collected.files.insert(base.to_string(), path);
    }

    Ok(collected)
}

/// Sorted base keys present on both sides.
///
/// `Some(n)` keeps the first `n` keys. `None` and `Some(0)` keep them all.
pub fn shared_keys(
    original: &CollectedFiles,
    yolo: &CollectedFiles,
    limit: Option<usize>,
) -> Vec<String> {
    let keys = original
        .files
        .keys()
        .filter(|key| yolo.files.contains_key(*key))
        .cloned();

    match limit.filter(|n| *n > 0) {
        Some(n) => keys.take(n).collect(),
        None => keys.collect(),
    }
}

/// Index image files under `root` by file stem.
///
/// Duplicate stems keep the first file in traversal order.
pub fn index_images(root: &Path) -> Result<CollectedFiles, LabelmapError> {
    let mut index = CollectedFiles::default();

    for (_, path) in walk_files(root, &mut index.warnings)? {
        if !has_extension(&path, &IMAGE_EXTENSIONS) {
            continue;
        }
        let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        index.files.entry(stem).or_insert(path);
    }

    Ok(index)
}

/// Sorted regular files under `root`.
///
/// Only a failure to read `root` itself is an error. Unreadable entries
/// below it, including symlink loops, become warnings and are skipped.
fn walk_files(
    root: &Path,
    warnings: &mut Vec<LoadWarning>,
) -> Result<Vec<(String, PathBuf)>, LabelmapError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(LabelmapError::Traverse {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                warnings.push(LoadWarning::for_file(
                    &path,
                    WarningCode::UnreadableEntry,
                    format!("skipping unreadable entry: {err}"),
                ));
                continue;
            }
        };

        if entry.file_type().is_file() {
            let name = entry.file_name().to_string_lossy().into_owned();
            files.push((name, entry.into_path()));
        }
    }

    Ok(files)
}

fn has_extension(path: &Path, allowed: &[&str]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    allowed
        .iter()
        .any(|allowed_ext| ext.eq_ignore_ascii_case(allowed_ext))
}
