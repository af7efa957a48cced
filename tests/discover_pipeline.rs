use labelmap::discover::{discover_label_mapping, DiscoverOptions, DiscoveryOutcome};
use labelmap::ir::WarningCode;

mod common;

use common::{write_text, Trees};

fn options(trees: &Trees) -> DiscoverOptions {
    DiscoverOptions {
        original_root: trees.original_root(),
        yolo_root: trees.yolo_root(),
        ..Default::default()
    }
}

#[test]
fn best_overlap_wins_and_weak_candidate_stays_unmatched() {
    let trees = Trees::new();
    trees
        .original("a", "button 0 0 0.1 0.1\n")
        .yolo("a", "5 0.05 0.045 0.1 0.09\n3 0.05 0.015 0.1 0.03\n");

    let report = discover_label_mapping(&options(&trees)).expect("discover");
    assert_eq!(report.files_analyzed, 1);
    assert_eq!(report.matched_pairs, 1);
    assert_eq!(report.unmatched_original, 0);
    assert_eq!(report.unmatched_yolo, 1);
    assert_eq!(report.mapping.len(), 1);
    assert_eq!(report.mapping.get("5").map(|m| m.label.as_str()), Some("button"));
    assert!(report.mapping.get("3").is_none());
}

#[test]
fn majority_label_wins_across_samples() {
    let trees = Trees::new();
    for (key, label) in [("a", "button"), ("b", "button"), ("c", "link"), ("d", "button")] {
        trees
            .original(key, &format!("{label} 0.2 0.2 0.4 0.4\n"))
            .yolo(key, "2 0.3 0.3 0.2 0.2\n");
    }

    let report = discover_label_mapping(&options(&trees)).expect("discover");
    assert_eq!(report.outcome(), DiscoveryOutcome::Mapped);

    let entry = report.mapping.get("2").expect("class 2 mapped");
    assert_eq!(entry.label, "button");
    assert_eq!((entry.hits, entry.total), (3, 4));
    assert!((entry.confidence - 0.75).abs() < 1e-12);
    assert_eq!(entry.alternatives.len(), 1);
    assert_eq!(entry.alternatives[0].label, "link");

    assert!(report
        .to_string()
        .contains("class 2: button (3/4, 75.0%)\n  other candidates: link:1\n"));
}

#[test]
fn duplicate_base_names_keep_first_file() {
    let trees = Trees::new();
    write_text(
        &trees.original_root().join("sub1/a_anno.txt"),
        "first 0.2 0.2 0.4 0.4\n",
    );
    write_text(
        &trees.original_root().join("sub2/a_anno.txt"),
        "second 0.2 0.2 0.4 0.4\n",
    );
    trees.yolo("a", "0 0.3 0.3 0.2 0.2\n");

    let report = discover_label_mapping(&options(&trees)).expect("discover");
    assert_eq!(report.mapping.get("0").map(|m| m.label.as_str()), Some("first"));
    assert_eq!(
        report
            .warnings
            .iter()
            .filter(|w| w.code == WarningCode::DuplicateBaseName)
            .count(),
        1
    );
}

#[test]
fn limit_caps_shared_samples_in_key_order() {
    let trees = Trees::new();
    for (id, key) in ["a", "b", "c"].into_iter().enumerate() {
        trees
            .original(key, "button 0.2 0.2 0.4 0.4\n")
            .yolo(key, &format!("{id} 0.3 0.3 0.2 0.2\n"));
    }

    let mut opts = options(&trees);
    opts.limit = Some(2);
    let report = discover_label_mapping(&opts).expect("discover");
    assert_eq!(report.shared_samples, 2);
    assert_eq!(report.files_analyzed, 2);

    opts.limit = Some(0);
    let report = discover_label_mapping(&opts).expect("discover");
    assert_eq!(report.shared_samples, 3);
}

#[test]
fn bad_lines_are_skipped_and_reported() {
    let trees = Trees::new();
    trees
        .original(
            "a",
            "# header\n\nbutton 0.2 0.2 0.4 0.4\nbutton 0.2 0.2 oops 0.4\nicon 0.5 0.5 0.5 0.6\n",
        )
        .yolo("a", "1 0.3 0.3 0.2 0.2\n1.7 0.8 0.8 0.1 0.1\nshort 0.1\n");

    let report = discover_label_mapping(&options(&trees)).expect("discover");
    let codes: Vec<WarningCode> = report.warnings.iter().map(|w| w.code).collect();
    assert!(codes.contains(&WarningCode::NonNumericCoordinate));
    assert!(codes.contains(&WarningCode::DegenerateBox));
    assert!(codes.contains(&WarningCode::ClassIdTruncated));
    assert!(codes.contains(&WarningCode::MissingTokens));

    assert_eq!(report.mapping.get("1").map(|m| m.label.as_str()), Some("button"));
    assert_eq!(report.unmatched_yolo, 1);
}

#[cfg(unix)]
#[test]
fn symlink_loop_in_original_tree_is_warned_not_fatal() {
    let trees = Trees::new();
    trees
        .original("a", "button 0.2 0.2 0.4 0.4\n")
        .yolo("a", "3 0.3 0.3 0.2 0.2\n");
    std::fs::create_dir_all(trees.original_root().join("sub")).expect("create sub dir");
    std::os::unix::fs::symlink(trees.original_root(), trees.original_root().join("sub/loop"))
        .expect("create symlink loop");

    let report = discover_label_mapping(&options(&trees)).expect("discover");
    assert_eq!(report.mapping.get("3").map(|m| m.label.as_str()), Some("button"));
    assert_eq!(report.files_analyzed, 1);
    assert!(report
        .warnings
        .iter()
        .any(|w| w.code == WarningCode::UnreadableEntry));
}
