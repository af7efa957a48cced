//! Feeds arbitrary UTF-8 text to the YOLO label line parser.

#![no_main]

use labelmap::ir::io_yolo::fuzz_parse_label_line;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    fuzz_parse_label_line(text);
});
