//! Reader for YOLO label files.
//!
//! One box per line, `<class> <x_center> <y_center> <width> <height>` with
//! coordinates normalized to the image size. Boxes are converted to XYXY and
//! clipped to the unit square. The class token is normalized through
//! [`ClassId::from_token`].

use std::path::Path;

use super::model::{ClassBox, Loaded};
use super::text::{self, LineIssue};
use super::warning::{LoadWarning, WarningCode};
use super::{BBoxXYXY, ClassId, Normalized};
use crate::error::LabelmapError;

/// A parsed YOLO line, plus a note when the class token lost precision.
#[derive(Debug, PartialEq)]
pub(crate) struct YoloLine {
    pub class_box: ClassBox<Normalized>,
    pub truncated_token: Option<String>,
}

/// Load every well-formed box from a YOLO label file.
///
/// Only failing to read the file is an error.
pub fn load_yolo(path: &Path) -> Result<Loaded<ClassBox<Normalized>>, LabelmapError> {
    let content = text::read_text(path)?;
    Ok(yolo_from_str(&content, path))
}

/// Parse YOLO label text. `source` is only used in warnings.
pub fn yolo_from_str(content: &str, source: &Path) -> Loaded<ClassBox<Normalized>> {
    let mut loaded = Loaded::default();

    for (line_num, line) in text::data_lines(content) {
        match parse_yolo_line(line) {
            Ok(parsed) => {
                if let Some(token) = parsed.truncated_token {
                    loaded.warnings.push(LoadWarning::at_line(
                        source,
                        line_num,
                        WarningCode::ClassIdTruncated,
                        format!(
                            "class token '{token}' truncated to class id {}",
                            parsed.class_box.class_id
                        ),
                    ));
                }
                loaded.items.push(parsed.class_box);
            }
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
pub(crate) fn parse_yolo_line(line: &str) -> Result<YoloLine, LineIssue> {
    let (token, [cx, cy, w, h]) = text::split_head_and_four(line, "class")?;

    let bbox = BBoxXYXY::<Normalized>::from_cxcywh(cx, cy, w, h).clip_to_unit();
    if !bbox.is_well_formed() {
        return Err(text::degenerate_box());
    }

    let (class_id, truncated) = ClassId::from_token(&token);
    Ok(YoloLine {
        class_box: ClassBox::new(class_id, bbox),
        truncated_token: truncated.then_some(token),
    })
}

/// Fuzz-only entrypoint for YOLO single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_line(input: &str) {
    for (_, line) in text::data_lines(input) {
        let _ = parse_yolo_line(line);
    }
}
