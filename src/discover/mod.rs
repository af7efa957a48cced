//! Label-mapping discovery.
//!
//! Pairs original and YOLO annotation files by base key, matches their boxes
//! by IoU, and votes each matched YOLO class id toward the original label it
//! overlaps. Per-line, per-file and per-sample problems are absorbed as
//! warnings; only a missing root aborts the run.

mod report;

pub use report::{DiscoveryOutcome, DiscoveryReport};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{LabelmapError, RootSide};
use crate::ir::io_original::load_original;
use crate::ir::io_yolo::load_yolo;
use crate::ir::{ClassBox, LoadWarning, Normalized, Pixel, SamplePair, WarningCode};
use crate::mapping::MappingCounts;
use crate::matching::match_boxes;
use crate::pairing::{collect_label_files, index_images, shared_keys};

/// Default IoU needed for two boxes to count as the same object.
pub const DEFAULT_MIN_IOU: f64 = 0.7;

/// How YOLO boxes are brought into the original files' coordinate space.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Denormalize {
    /// Compare coordinates as they are.
    #[default]
    None,
    /// Every image has the same size.
    Fixed { width: u32, height: u32 },
    /// Read each sample's image size from a tree of images keyed by stem.
    ImagesRoot(PathBuf),
}

/// Options for a discovery run.
#[derive(Clone, Debug)]
pub struct DiscoverOptions {
    pub original_root: PathBuf,
    pub yolo_root: PathBuf,
    /// Suffix stripped from original file names to get the base key.
    pub orig_suffix: String,
    /// Suffix stripped from YOLO file names to get the base key.
    pub yolo_suffix: String,
    pub min_iou: f64,
    /// Cap on the number of shared samples; `None` or `Some(0)` means all.
    pub limit: Option<usize>,
    pub denormalize: Denormalize,
}

impl Default for DiscoverOptions {
    fn default() -> Self {
        Self {
            original_root: PathBuf::new(),
            yolo_root: PathBuf::new(),
            orig_suffix: "_anno.txt".to_string(),
            yolo_suffix: ".txt".to_string(),
            min_iou: DEFAULT_MIN_IOU,
            limit: None,
            denormalize: Denormalize::None,
        }
    }
}

/// Run discovery over two annotation trees.
pub fn discover_label_mapping(opts: &DiscoverOptions) -> Result<DiscoveryReport, LabelmapError> {
    require_dir(&opts.original_root, RootSide::Original)?;
    require_dir(&opts.yolo_root, RootSide::Yolo)?;

    let original_files = collect_label_files(&opts.original_root, &opts.orig_suffix)?;
    let yolo_files = collect_label_files(&opts.yolo_root, &opts.yolo_suffix)?;
    log::info!(
        "collected {} original and {} YOLO annotation files",
        original_files.len(),
        yolo_files.len()
    );

    let mut report = DiscoveryReport::default();
    for warning in original_files
        .warnings
        .iter()
        .chain(yolo_files.warnings.iter())
    {
        absorb(&mut report.warnings, warning.clone());
    }

    let keys = shared_keys(&original_files, &yolo_files, opts.limit);
    report.shared_samples = keys.len();
    if keys.is_empty() {
        return Ok(report);
    }

    let scaler = Scaler::new(&opts.denormalize, &mut report.warnings)?;
    let mut counts = MappingCounts::new();

    for key in &keys {
        let (Some(orig_path), Some(yolo_path)) = (original_files.get(key), yolo_files.get(key))
        else {
            continue;
        };

        let Some(sample) = load_sample(key, orig_path, yolo_path, &scaler, &mut report.warnings)
        else {
            continue;
        };

        let matches = match_boxes(&sample.labeled, &sample.classed, opts.min_iou);
        report.unmatched_original += sample.labeled.len() - matches.len();
        report.unmatched_yolo += sample.classed.len() - matches.len();
        report.matched_pairs += matches.len();

        for m in &matches {
            counts.record(
                &sample.classed[m.class_idx].class_id,
                &sample.labeled[m.orig_idx].label,
            );
        }
        report.files_analyzed += 1;
    }

    report.mapping = counts.finalize();
    Ok(report)
}

fn require_dir(path: &Path, side: RootSide) -> Result<(), LabelmapError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(LabelmapError::RootNotFound {
            side,
            path: path.to_path_buf(),
        })
    }
}

fn absorb(warnings: &mut Vec<LoadWarning>, warning: LoadWarning) {
    log::warn!("{warning}");
    warnings.push(warning);
}

/// Load both sides of one sample.
///
/// Returns `None` when the sample should be skipped: a file could not be
/// read, either side has no usable boxes, or its image size is unknown.
fn load_sample(
    key: &str,
    orig_path: &Path,
    yolo_path: &Path,
    scaler: &Scaler,
    warnings: &mut Vec<LoadWarning>,
) -> Option<SamplePair> {
    let labeled = match load_original(orig_path) {
        Ok(loaded) => {
            loaded.warnings.into_iter().for_each(|w| absorb(warnings, w));
            loaded.items
        }
        Err(err) => {
            absorb(warnings, unreadable(orig_path, &err));
            return None;
        }
    };

    let classed = match load_yolo(yolo_path) {
        Ok(loaded) => {
            loaded.warnings.into_iter().for_each(|w| absorb(warnings, w));
            loaded.items
        }
        Err(err) => {
            absorb(warnings, unreadable(yolo_path, &err));
            return None;
        }
    };

    if labeled.is_empty() || classed.is_empty() {
        log::debug!("skipping '{key}': no boxes on one side");
        return None;
    }

    let classed = match scaler.scale(key, yolo_path, &classed) {
        Ok(scaled) => scaled,
        Err(warning) => {
            absorb(warnings, warning);
            return None;
        }
    };

    Some(SamplePair {
        key: key.to_string(),
        labeled,
        classed,
    })
}

fn unreadable(path: &Path, err: &LabelmapError) -> LoadWarning {
    LoadWarning::for_file(
        path,
        WarningCode::UnreadableFile,
        format!("skipping sample: {err}"),
    )
}

/// Resolved form of [`Denormalize`], with the image tree indexed once.
enum Scaler {
    Identity,
    Fixed(f64, f64),
    PerImage(BTreeMap<String, PathBuf>),
}

impl Scaler {
    fn new(
        denormalize: &Denormalize,
        warnings: &mut Vec<LoadWarning>,
    ) -> Result<Self, LabelmapError> {
        Ok(match denormalize {
            Denormalize::None => Scaler::Identity,
            Denormalize::Fixed { width, height } => Scaler::Fixed(*width as f64, *height as f64),
            Denormalize::ImagesRoot(root) => {
                if !root.is_dir() {
                    return Err(LabelmapError::InvalidOption(format!(
                        "images root is not a directory: {}",
                        root.display()
                    )));
                }
                let index = index_images(root)?;
                index.warnings.into_iter().for_each(|w| absorb(warnings, w));
                Scaler::PerImage(index.files)
            }
        })
    }

    fn scale(
        &self,
        key: &str,
        yolo_path: &Path,
        boxes: &[ClassBox<Normalized>],
    ) -> Result<Vec<ClassBox<Pixel>>, LoadWarning> {
        let (width, height) = match self {
            Scaler::Identity => (1.0, 1.0),
            Scaler::Fixed(width, height) => (*width, *height),
            Scaler::PerImage(images) => image_size(images, key, yolo_path)?,
        };
        Ok(boxes.iter().map(|b| b.to_pixel(width, height)).collect())
    }
}

/// Look up the image for `key`, trying the full key and then its stem.
fn image_size(
    images: &BTreeMap<String, PathBuf>,
    key: &str,
    yolo_path: &Path,
) -> Result<(f64, f64), LoadWarning> {
    let stem = Path::new(key)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned());
    let image_path = images
        .get(key)
        .or_else(|| stem.as_deref().and_then(|s| images.get(s)))
        .ok_or_else(|| {
            LoadWarning::for_file(
                yolo_path,
                WarningCode::MissingImage,
                format!("no image found for sample '{key}'; skipping"),
            )
        })?;

    let size = imagesize::size(image_path).map_err(|err| {
        LoadWarning::for_file(
            image_path,
            WarningCode::ImageDimensionRead,
            format!("cannot read image dimensions ({err}); skipping sample '{key}'"),
        )
    })?;

    Ok((size.width as f64, size.height as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, content).expect("write file");
    }

    fn options(root: &Path) -> DiscoverOptions {
        DiscoverOptions {
            original_root: root.join("orig"),
            yolo_root: root.join("yolo"),
            ..Default::default()
        }
    }

    #[test]
    fn missing_roots_are_fatal() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = discover_label_mapping(&options(temp.path())).unwrap_err();
        assert!(matches!(
            err,
            LabelmapError::RootNotFound {
                side: RootSide::Original,
                ..
            }
        ));

        fs::create_dir_all(temp.path().join("orig")).expect("create orig");
        let err = discover_label_mapping(&options(temp.path())).unwrap_err();
        assert!(matches!(
            err,
            LabelmapError::RootNotFound {
                side: RootSide::Yolo,
                ..
            }
        ));
    }

    #[test]
    fn no_shared_files_is_reported_not_fatal() {
        let temp = tempfile::tempdir().expect("create temp dir");
        write(&temp.path().join("orig/a_anno.txt"), "cat 0 0 1 1\n");
        write(&temp.path().join("yolo/b.txt"), "0 0.5 0.5 1 1\n");

        let report = discover_label_mapping(&options(temp.path())).expect("run");
        assert_eq!(report.outcome(), DiscoveryOutcome::NoSharedFiles);
    }

    #[test]
    fn normalized_originals_match_without_scaling() {
        let temp = tempfile::tempdir().expect("create temp dir");
        write(
            &temp.path().join("orig/s1_anno.txt"),
            "cat 0.1 0.1 0.3 0.3\ndog 0.6 0.6 0.9 0.9\n",
        );
        write(
            &temp.path().join("yolo/s1.txt"),
            "0 0.2 0.2 0.2 0.2\n1 0.75 0.75 0.3 0.3\n5 0.5 0.05 0.1 0.1\n",
        );

        let report = discover_label_mapping(&options(temp.path())).expect("run");
        assert_eq!(report.outcome(), DiscoveryOutcome::Mapped);
        assert_eq!(report.files_analyzed, 1);
        assert_eq!(report.unmatched_original, 0);
        assert_eq!(report.unmatched_yolo, 1);
        assert_eq!(report.mapping.get("0").expect("class 0").label, "cat");
        assert_eq!(report.mapping.get("1").expect("class 1").label, "dog");
    }

    #[test]
    fn samples_with_an_empty_side_are_skipped_silently() {
        let temp = tempfile::tempdir().expect("create temp dir");
        write(&temp.path().join("orig/s1_anno.txt"), "# nothing here\n");
        write(&temp.path().join("yolo/s1.txt"), "0 0.5 0.5 0.2 0.2\n");

        let report = discover_label_mapping(&options(temp.path())).expect("run");
        assert_eq!(report.shared_samples, 1);
        assert_eq!(report.files_analyzed, 0);
        assert_eq!(report.unmatched_yolo, 0);
        assert!(report.warnings.is_empty());
        assert_eq!(report.outcome(), DiscoveryOutcome::NoMatches);
    }

    #[test]
    fn fixed_size_denormalizes_yolo_boxes() {
        let temp = tempfile::tempdir().expect("create temp dir");
        write(&temp.path().join("orig/shot_anno.txt"), "button 945 28 969 50\n");
        // (945, 28, 969, 50) in a 1000x100 image.
        write(&temp.path().join("yolo/shot.txt"), "7 0.957 0.39 0.024 0.22\n");

        let mut opts = options(temp.path());
        opts.denormalize = Denormalize::Fixed {
            width: 1000,
            height: 100,
        };

        let report = discover_label_mapping(&opts).expect("run");
        let entry = report.mapping.get("7").expect("class 7");
        assert_eq!(entry.label, "button");
        assert_eq!(entry.confidence, 1.0);
    }

    #[test]
    fn images_root_without_matching_image_skips_sample() {
        let temp = tempfile::tempdir().expect("create temp dir");
        write(&temp.path().join("orig/shot_anno.txt"), "button 945 28 969 50\n");
        write(&temp.path().join("yolo/shot.txt"), "7 0.957 0.39 0.024 0.22\n");
        fs::create_dir_all(temp.path().join("images")).expect("create images dir");

        let mut opts = options(temp.path());
        opts.denormalize = Denormalize::ImagesRoot(temp.path().join("images"));

        let report = discover_label_mapping(&opts).expect("run");
        assert_eq!(report.files_analyzed, 0);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code, WarningCode::MissingImage);
    }
}
