//! Annotation data model and readers.
//!
//! Two independently produced annotation trees describe the same images:
//!
//! - **Original** files: `<label> <x1> <y1> <x2> <y2>` in pixels, read by
//!   [`io_original`] into [`LabeledBox`]es.
//! - **YOLO** files: `<class> <cx> <cy> <w> <h>` normalized, read by
//!   [`io_yolo`] into [`ClassBox`]es.
//!
//! Boxes carry their coordinate space in the type ([`Pixel`] or
//! [`Normalized`]), so comparing the two sides needs an explicit
//! [`BBoxXYXY::to_pixel`] step.
//!
//! Readers never fail on bad content. Malformed lines come back as
//! [`LoadWarning`]s next to the boxes that did parse.
//!
//! # Example
//!
//! ```
//! use std::path::Path;
//! use labelmap::ir::io_yolo::yolo_from_str;
//!
//! let loaded = yolo_from_str("7 0.5 0.5 0.2 0.2\nbad line\n", Path::new("img.txt"));
//! assert_eq!(loaded.items.len(), 1);
//! assert_eq!(loaded.items[0].class_id.as_str(), "7");
//! assert_eq!(loaded.warning_count(), 1);
//! ```

mod bbox;
mod ids;
pub mod io_jsonl;
pub mod io_original;
pub mod io_yolo;
mod model;
mod text;
mod warning;

pub use bbox::{BBoxXYXY, Normalized, Pixel};
pub use ids::ClassId;
pub use model::{ClassBox, LabeledBox, Loaded, SamplePair};
pub use warning::{LoadWarning, WarningCode};
