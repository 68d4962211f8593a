//! Fuzz target for VOC XML parsing.
//!
//! The parser turns every failure into an error record, so any panic here is
//! a bug.

#![no_main]

use libfuzzer_sys::fuzz_target;
use voc_tools::io::voc_xml::parse_voc_xml_slice;
use voc_tools::io::ReadOptions;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let annotations = parse_voc_xml_slice(data, "fuzz.xml", &ReadOptions::default());
    assert!(!annotations.is_empty());
});
