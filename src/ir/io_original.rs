//! Reader for "original" annotation files.
//!
//! One box per line, `<label> <x1> <y1> <x2> <y2>` in absolute pixel
//! coordinates. Blank lines and `#` comments are ignored. Bad lines are
//! skipped with a line-numbered [`LoadWarning`] instead of failing the file.

use std::path::Path;

use super::model::{LabeledBox, Loaded};
use super::text::{self, LineIssue};
use super::warning::LoadWarning;
use super::BBoxXYXY;
use crate::error::LabelmapError;

/// Load every well-formed box from an original annotation file.
///
/// Only failing to read the file is an error.
pub fn load_original(path: &Path) -> Result<Loaded<LabeledBox>, LabelmapError> {
    let content = text::read_text(path)?;
    Ok(original_from_str(&content, path))
}

/// Parse original annotation text. `source` is only used in warnings.
pub fn original_from_str(content: &str, source: &Path) -> Loaded<LabeledBox> {
    let mut loaded = Loaded::default();

    for (line_num, line) in text::data_lines(content) {
        match parse_original_line(line) {
            Ok(labeled) => loaded.items.push(labeled),
            Err(issue) => loaded.warnings.push(LoadWarning::at_line(
                source,
                line_num,
                issue.code,
                issue.message,
            )),
        }
    }

    loaded
}

/// Parse one trimmed, non-comment line.
pub(crate) fn parse_original_line(line: &str) -> Result<LabeledBox, LineIssue> {
    let (label, [x1, y1, x2, y2]) = text::split_head_and_four(line, "label")?;

    let bbox = BBoxXYXY::from_xyxy(x1, y1, x2, y2);
    if !bbox.is_well_formed() {
        return Err(text::degenerate_box());
    }

    Ok(LabeledBox::new(label, bbox))
}

/// Fuzz-only entrypoint for original single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_original_line(input: &str) {
    for (_, line) in text::data_lines(input) {
        let _ = parse_original_line(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::WarningCode;
    use std::fs;

    #[test]
    fn parses_label_and_corners() {
        let labeled = parse_original_line("button 945 28 969 50").expect("valid line");
        assert_eq!(labeled.label, "button");
        assert_eq!(labeled.bbox, BBoxXYXY::from_xyxy(945.0, 28.0, 969.0, 50.0));
    }

    #[test]
    fn bad_lines_are_warned_and_skipped() {
        let content = "\
# comment
button 945 28 969 50
short 1 2 3
wrong 1 2 x 4

flat 10 10 10 20
inverted 10 20 30 5
link 1.5 2.5 30 40
";
        let loaded = original_from_str(content, Path::new("a_anno.txt"));

        let labels: Vec<&str> = loaded.items.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["button", "link"]);

        let codes: Vec<(Option<usize>, WarningCode)> = loaded
            .warnings
            .iter()
            .map(|w| (w.line, w.code))
            .collect();
        assert_eq!(
            codes,
            vec![
                (Some(3), WarningCode::MissingTokens),
                (Some(4), WarningCode::NonNumericCoordinate),
                (Some(6), WarningCode::DegenerateBox),
                (Some(7), WarningCode::DegenerateBox),
            ]
        );
        assert_eq!(loaded.warning_count(), 4);
    }

    #[test]
    fn warning_display_names_file_and_line() {
        let loaded = original_from_str("x 1 2\n", Path::new("dir/a_anno.txt"));
        assert_eq!(
            loaded.warnings[0].to_string(),
            "dir/a_anno.txt: line 1 malformed (expected label + 4 coords)"
        );
    }

    #[test]
    fn load_original_reads_from_disk() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("img_anno.txt");
        fs::write(&path, "cat 0 0 10 10\ndog 5 5 20 20\n").expect("write annotations");

        let loaded = load_original(&path).expect("load original");
        assert_eq!(loaded.items.len(), 2);
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn load_original_missing_file_is_an_error() {
        let err = load_original(Path::new("does/not/exist_anno.txt")).unwrap_err();
        assert!(matches!(err, LabelmapError::FileRead { .. }));
    }
}
