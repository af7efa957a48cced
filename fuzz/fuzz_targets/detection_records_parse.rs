//! Feeds arbitrary UTF-8 text to the JSONL detection record reader.

#![no_main]

use std::path::Path;

use labelmap::ir::io_jsonl::records_from_str;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let loaded = records_from_str(text, Path::new("fuzz.jsonl"));
    for record in &loaded.items {
        let _ = record.has_detections();
    }
});
