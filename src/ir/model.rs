//! Box records produced by the annotation loaders.

use super::bbox::{BBoxXYXY, Normalized, Pixel};
use super::ids::ClassId;
use super::warning::LoadWarning;

/// A box from an original annotation file, with its human-readable label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledBox {
    pub label: String,
    pub bbox: BBoxXYXY<Pixel>,
}

impl LabeledBox {
    pub fn new(label: impl Into<String>, bbox: BBoxXYXY<Pixel>) -> Self {
        Self {
            label: label.into(),
            bbox,
        }
    }
}

/// A box from a YOLO label file, tagged with its class identifier.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassBox<TSpace> {
    pub class_id: ClassId,
    pub bbox: BBoxXYXY<TSpace>,
}

impl<TSpace> ClassBox<TSpace> {
    pub fn new(class_id: impl Into<ClassId>, bbox: BBoxXYXY<TSpace>) -> Self {
        Self {
            class_id: class_id.into(),
            bbox,
        }
    }
}

impl ClassBox<Normalized> {
    /// Scales the box into pixel space, keeping the class id.
    pub fn to_pixel(&self, image_width: f64, image_height: f64) -> ClassBox<Pixel> {
        ClassBox {
            class_id: self.class_id.clone(),
            bbox: self.bbox.to_pixel(image_width, image_height),
        }
    }
}

/// Items loaded from one file, plus the lines that were skipped.
#[derive(Clone, Debug)]
pub struct Loaded<T> {
    pub items: Vec<T>,
    pub warnings: Vec<LoadWarning>,
}

impl<T> Loaded<T> {
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// One base key with the boxes from both annotation trees.
#[derive(Clone, Debug)]
pub struct SamplePair {
    pub key: String,
    pub labeled: Vec<LabeledBox>,
    pub classed: Vec<ClassBox<Pixel>>,
}
