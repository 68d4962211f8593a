use std::fmt;

use serde::{Serialize, Serializer};

/// Prefix used when an error label is rendered as text.
pub const ERROR_PREFIX: &str = "ERROR:";

/// Class name of an annotation, or text of a caption.
///
/// Files that yield nothing and files that fail to parse still produce one
/// record; the variant tells them apart without inspecting the text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    /// A label read from the file.
    Value(String),
    /// Placeholder for a file with zero entries, holding the empty marker.
    Empty(String),
    /// Placeholder for a file that failed to parse, holding the description.
    Error(String),
}

impl Label {
    pub fn is_value(&self) -> bool {
        matches!(self, Label::Value(_))
    }

    pub fn is_empty_marker(&self) -> bool {
        matches!(self, Label::Empty(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Label::Error(_))
    }

    /// The label text for [`Label::Value`], `None` for placeholders.
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Label::Value(value) => Some(value),
            Label::Empty(_) | Label::Error(_) => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Value(text) | Label::Empty(text) => f.write_str(text),
            Label::Error(description) => write!(f, "{ERROR_PREFIX}{description}"),
        }
    }
}

impl Serialize for Label {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
