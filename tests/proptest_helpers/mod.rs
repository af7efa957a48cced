#![allow(dead_code)]

use labelmap::ir::{BBoxXYXY, ClassBox, LabeledBox, Pixel};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Well-formed pixel box inside a 1000x1000 canvas.
pub fn arb_pixel_box() -> impl Strategy<Value = BBoxXYXY<Pixel>> {
    (0.0f64..900.0, 0.0f64..900.0, 1.0f64..100.0, 1.0f64..100.0)
        .prop_map(|(x, y, w, h)| BBoxXYXY::from_xyxy(x, y, x + w, y + h))
}

/// Boxes on a coarse grid so that identical and touching boxes show up often.
pub fn arb_grid_box() -> impl Strategy<Value = BBoxXYXY<Pixel>> {
    (0u8..6, 0u8..6, 1u8..4, 1u8..4).prop_map(|(x, y, w, h)| {
        let (x, y) = (f64::from(x) * 10.0, f64::from(y) * 10.0);
        BBoxXYXY::from_xyxy(x, y, x + f64::from(w) * 10.0, y + f64::from(h) * 10.0)
    })
}

pub fn arb_label() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["button", "link", "icon", "text_field"]).prop_map(String::from)
}

pub fn arb_labeled_boxes(max: usize) -> impl Strategy<Value = Vec<LabeledBox>> {
    prop::collection::vec(
        (arb_label(), arb_grid_box()).prop_map(|(label, bbox)| LabeledBox::new(label, bbox)),
        0..=max,
    )
}

pub fn arb_class_boxes(max: usize) -> impl Strategy<Value = Vec<ClassBox<Pixel>>> {
    prop::collection::vec(
        (0u8..5, arb_grid_box()).prop_map(|(id, bbox)| ClassBox::new(id.to_string().as_str(), bbox)),
        0..=max,
    )
}

/// A YOLO line with values that may spill outside the unit square.
pub fn arb_yolo_line() -> impl Strategy<Value = String> {
    (
        0u16..80,
        -0.5f64..1.5,
        -0.5f64..1.5,
        0.0f64..1.5,
        0.0f64..1.5,
    )
        .prop_map(|(id, cx, cy, w, h)| format!("{id} {cx} {cy} {w} {h}"))
}
