use std::fmt;

use serde::Serialize;

use super::{fmt_named, Label, RawValue, Record};

/// One caption line attached to an image.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Caption {
    #[serde(rename = "file")]
    filename: String,
    caption: Label,
}

impl Caption {
    pub fn new(filename: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            caption: Label::Value(caption.into()),
        }
    }

    /// Placeholder for a caption file without non-blank lines.
    pub fn empty(filename: impl Into<String>, marker: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            caption: Label::Empty(marker.into()),
        }
    }

    /// Placeholder for a caption file that could not be read.
    pub fn error(filename: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            caption: Label::Error(description.into()),
        }
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn caption(&self) -> &Label {
        &self.caption
    }
}

impl Record for Caption {
    const FIELDS: &'static [&'static str] = &["file", "caption"];

    fn raw(&self) -> Vec<RawValue> {
        vec![
            RawValue::Text(self.filename.clone()),
            RawValue::Text(self.caption.to_string()),
        ]
    }

    fn filename(&self) -> &str {
        &self.filename
    }

    fn label(&self) -> &Label {
        &self.caption
    }
}

impl fmt::Display for Caption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_named(self, f)
    }
}
