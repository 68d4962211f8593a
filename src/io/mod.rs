//! Readers and writers for the VOC directory layout.
//!
//! - [`layout`]: directory walker and companion-path conventions
//! - [`voc_xml`]: annotation XML parser
//! - [`caption_txt`]: caption text parser
//! - [`reader`]: bulk reads over a split and single-file dispatch
//! - [`csv_out`]: CSV export

pub mod caption_txt;
pub mod csv_out;
pub mod layout;
pub mod reader;
pub mod voc_xml;

pub use layout::{list_dir, PathStyle, SubDir};
pub use reader::Grouping;

use crate::record::DEFAULT_EMPTY_MARKER;

/// Options shared by the parsers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadOptions {
    /// Label given to the placeholder of a file with zero entries.
    pub empty_marker: String,
}

impl ReadOptions {
    pub fn with_empty_marker(marker: impl Into<String>) -> Self {
        Self {
            empty_marker: marker.into(),
        }
    }
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self::with_empty_marker(DEFAULT_EMPTY_MARKER)
    }
}
