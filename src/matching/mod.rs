//! Greedy one-to-one box matching by IoU.
//!
//! Every pair at or above the threshold is a candidate. Candidates are
//! sorted by IoU descending and accepted greedily whenever neither box has
//! been claimed. The result is not an optimal assignment, but for two
//! annotations of the same objects the thresholded pairs are rarely
//! contested.

use crate::ir::{BBoxXYXY, ClassBox, LabeledBox, Pixel};

/// One accepted pairing between an original box and a YOLO box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxMatch {
    /// Index into the labeled (original) list.
    pub orig_idx: usize,
    /// Index into the class (YOLO) list.
    pub class_idx: usize,
    /// IoU that won the pairing.
    pub iou: f64,
}

/// Match labeled boxes against class boxes, both in pixel space.
///
/// Ties in IoU keep row-major enumeration order (lower original index first,
/// then lower class index). Boxes left out of the result are unmatched; the
/// caller derives those counts.
pub fn match_boxes(
    labeled: &[LabeledBox],
    classed: &[ClassBox<Pixel>],
    min_iou: f64,
) -> Vec<BoxMatch> {
    let left: Vec<BBoxXYXY<Pixel>> = labeled.iter().map(|b| b.bbox).collect();
    let right: Vec<BBoxXYXY<Pixel>> = classed.iter().map(|b| b.bbox).collect();
    greedy_match(&left, &right, min_iou)
}

/// Greedy matching over bare boxes.
pub fn greedy_match<TSpace>(
    left: &[BBoxXYXY<TSpace>],
    right: &[BBoxXYXY<TSpace>],
    min_iou: f64,
) -> Vec<BoxMatch> {
    let mut candidates: Vec<BoxMatch> = Vec::new();
    for (orig_idx, a) in left.iter().enumerate() {
        for (class_idx, b) in right.iter().enumerate() {
            let iou = a.iou(b);
            if iou >= min_iou {
                candidates.push(BoxMatch {
                    orig_idx,
                    class_idx,
                    iou,
                });
            }
        }
    }

    // Stable: equal IoUs stay in enumeration order.
    candidates.sort_by(|x, y| y.iou.total_cmp(&x.iou));

    let mut used_left = vec![false; left.len()];
    let mut used_right = vec![false; right.len()];
    let mut matches = Vec::new();

    for candidate in candidates {
        if used_left[candidate.orig_idx] || used_right[candidate.class_idx] {
            continue;
        }
        used_left[candidate.orig_idx] = true;
        used_right[candidate.class_idx] = true;
        matches.push(candidate);
    }

    matches
}
