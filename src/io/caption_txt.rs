//! Caption text reader: one caption per non-blank line.

use std::fs;
use std::path::Path;

use super::layout::file_name_string;
use super::ReadOptions;
use crate::record::{Caption, Label};

/// Reads the captions of one text file, in line order.
///
/// Blank lines are skipped. A file without captions yields one empty
/// placeholder; an unreadable file yields one error placeholder.
pub fn read_captions(path: &Path, opts: &ReadOptions) -> std::vec::IntoIter<Caption> {
    let filename = file_name_string(path);
    log::debug!("reading captions from {}", path.display());

    let captions = match fs::read(path) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(text) => parse_captions_str(&text, &filename, opts),
            Err(source) => vec![Caption::error(filename, source.to_string())],
        },
        Err(source) => vec![Caption::error(filename, source.to_string())],
    };

    if let Some(Label::Error(description)) = captions.first().map(Caption::caption) {
        log::warn!("failed to read captions from {}: {description}", path.display());
    }

    captions.into_iter()
}

/// Splits caption text held in memory.
pub fn parse_captions_str(text: &str, filename: &str, opts: &ReadOptions) -> Vec<Caption> {
    let captions: Vec<Caption> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| Caption::new(filename, line))
        .collect();

    if captions.is_empty() {
        vec![Caption::empty(filename, opts.empty_marker.clone())]
    } else {
        captions
    }
}
