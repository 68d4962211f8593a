//! Fuzz target for caption text splitting.

#![no_main]

use libfuzzer_sys::fuzz_target;
use voc_tools::io::caption_txt::parse_captions_str;
use voc_tools::io::ReadOptions;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let captions = parse_captions_str(text, "fuzz.txt", &ReadOptions::default());
    assert!(!captions.is_empty());
});
