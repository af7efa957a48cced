//! Feeds arbitrary UTF-8 text to the `label x1 y1 x2 y2` line parser.

#![no_main]

use labelmap::ir::io_original::fuzz_parse_original_line;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    fuzz_parse_original_line(text);
});
